// Domain layer: the patron record and the import summary. No I/O here.

pub mod model;
