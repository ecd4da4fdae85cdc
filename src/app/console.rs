use crate::core::{ImportResult, Patron, PatronManager, RejectReason};
use crate::utils::error::Result;
use std::io::{BufRead, Write};

const BANNER: &str = "===== Library Management System =====";
const TABLE_HEADER: &str = "ID       | Name | Address | Fine";
const TABLE_RULE: &str = "-------------------------------------------------------------";
const EMPTY_LISTING: &str = "(No patrons in the system.)";

/// Menu-driven console over a [`PatronManager`]. Generic over its streams so
/// a whole session can be replayed from memory.
pub struct LibraryApp<R, W> {
    manager: PatronManager,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LibraryApp<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::with_manager(PatronManager::new(), input, output)
    }

    pub fn with_manager(manager: PatronManager, input: R, output: W) -> Self {
        Self {
            manager,
            input,
            output,
        }
    }

    pub fn manager(&self) -> &PatronManager {
        &self.manager
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user picks Exit or input runs out. `startup_import`
    /// replaces the startup prompt when given.
    pub fn run(&mut self, startup_import: Option<&str>) -> Result<()> {
        writeln!(self.output, "{}", BANNER)?;

        let path = match startup_import {
            Some(path) => path.trim().to_string(),
            None => match self.prompt("Enter path to import file (or press Enter to skip): ")? {
                Some(path) => path,
                None => return Ok(()),
            },
        };
        if !path.is_empty() {
            self.import(&path)?;
        }

        loop {
            self.show_menu()?;
            let Some(choice) = self.read_line()? else {
                tracing::debug!("Input closed, leaving menu");
                return Ok(());
            };
            match choice.as_str() {
                "1" => self.import_from_file()?,
                "2" => self.add_manually()?,
                "3" => self.remove_by_id()?,
                "4" => self.print_all()?,
                "5" => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Please choose 1-5.")?,
            }
        }
    }

    fn show_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "1) Import patrons from file")?;
        writeln!(self.output, "2) Add patron manually")?;
        writeln!(self.output, "3) Remove patron by ID")?;
        writeln!(self.output, "4) List all patrons")?;
        writeln!(self.output, "5) Exit")?;
        write!(self.output, "Select an option: ")?;
        self.output.flush()?;
        Ok(())
    }

    fn import_from_file(&mut self) -> Result<()> {
        if let Some(path) = self.prompt("Enter file path: ")? {
            self.import(&path)?;
        }
        Ok(())
    }

    fn import(&mut self, path: &str) -> Result<()> {
        let result = self.manager.load_from_file(path);
        self.report(&result)?;
        self.print_all()
    }

    fn report(&mut self, result: &ImportResult) -> Result<()> {
        writeln!(self.output, "{}", result)?;
        if !result.is_empty() {
            writeln!(self.output, "Errors:")?;
            for error in result.errors() {
                writeln!(self.output, "  {}", error)?;
            }
        }
        Ok(())
    }

    fn add_manually(&mut self) -> Result<()> {
        let Some(id) = self.prompt("Enter 7-digit ID: ")? else {
            return Ok(());
        };
        // Typed ids read as signed, so "-5" is an invalid patron rather than
        // an invalid number.
        let Ok(id) = id.parse::<i32>() else {
            return self.reject_number();
        };
        let Some(name) = self.prompt("Enter full name: ")? else {
            return Ok(());
        };
        let Some(address) = self.prompt("Enter address: ")? else {
            return Ok(());
        };
        let Some(fine) = self.prompt("Enter fine (0-250): ")? else {
            return Ok(());
        };
        let Ok(fine) = fine.parse::<f64>() else {
            return self.reject_number();
        };

        let outcome = match u32::try_from(id) {
            Ok(id) => self.manager.add_patron(Patron::new(id, name, address, fine)),
            Err(_) => Err(RejectReason::Invalid),
        };
        match outcome {
            Ok(()) => writeln!(self.output, "Patron added.")?,
            Err(reason) => {
                tracing::debug!("Manual add of {} rejected: {}", id, reason);
                writeln!(self.output, "Patron not added (duplicate/invalid).")?;
            }
        }
        self.print_all()
    }

    fn reject_number(&mut self) -> Result<()> {
        writeln!(self.output, "Invalid number. Patron not added.")?;
        self.print_all()
    }

    fn remove_by_id(&mut self) -> Result<()> {
        let Some(id) = self.prompt("Enter ID to remove: ")? else {
            return Ok(());
        };
        match id.parse::<i32>() {
            Ok(id) if u32::try_from(id).is_ok_and(|id| self.manager.remove_patron(id)) => {
                writeln!(self.output, "Patron removed.")?
            }
            Ok(_) => writeln!(self.output, "ID not found.")?,
            Err(_) => writeln!(self.output, "Invalid ID.")?,
        }
        self.print_all()
    }

    fn print_all(&mut self) -> Result<()> {
        writeln!(self.output)?;
        if self.manager.is_empty() {
            writeln!(self.output, "{}", EMPTY_LISTING)?;
            return Ok(());
        }

        writeln!(self.output, "{}", TABLE_HEADER)?;
        writeln!(self.output, "{}", TABLE_RULE)?;
        for patron in self.manager.sorted() {
            writeln!(self.output, "{}", patron)?;
        }
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Next trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(script: &str) -> (String, PatronManager) {
        let mut app = LibraryApp::new(Cursor::new(script.to_string()), Vec::new());
        app.run(None).unwrap();
        let LibraryApp { manager, output, .. } = app;
        (String::from_utf8(output).unwrap(), manager)
    }

    #[test]
    fn test_exit_immediately() {
        let (output, manager) = session("\n5\n");
        assert!(output.starts_with(BANNER));
        assert!(output.contains("Select an option: "));
        assert!(output.ends_with("Goodbye!\n"));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_add_and_list_sorted() {
        let script = "\n2\n7654321\nBob\nElm St\n5\n2\n1234567\nJane Doe\n12 Oak St\n10\n4\n5\n";
        let (output, manager) = session(script);

        assert_eq!(manager.len(), 2);
        assert_eq!(output.matches("Patron added.").count(), 2);

        let listing = output.rsplit(TABLE_RULE).next().unwrap();
        let jane = listing.find("1234567 | Jane Doe | 12 Oak St | $10.00").unwrap();
        let bob = listing.find("7654321 | Bob | Elm St | $5.00").unwrap();
        assert!(jane < bob);
    }

    #[test]
    fn test_non_numeric_id_stops_add() {
        let (output, manager) = session("\n2\nabc\n5\n");
        assert!(output.contains("Invalid number. Patron not added."));
        assert!(!output.contains("Enter full name: "));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_non_numeric_fine_stops_add() {
        let (output, manager) = session("\n2\n1234567\nJane\nOak\nfree\n5\n");
        assert!(output.contains("Invalid number. Patron not added."));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_invalid_patron_reported_generically() {
        let (output, _) = session("\n2\n1234567\nJane\nOak\n300\n5\n");
        assert!(output.contains("Patron not added (duplicate/invalid)."));
        assert!(output.contains(EMPTY_LISTING));
    }

    #[test]
    fn test_negative_id_is_invalid_patron() {
        let (output, manager) = session("\n2\n-1234567\nJane\nOak\n1\n3\n-1\n5\n");
        assert!(output.contains("Patron not added (duplicate/invalid)."));
        assert!(output.contains("ID not found."));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_remove_outcomes() {
        let script = "\n2\n1234567\nJane\nOak\n1\n3\n7654321\n3\nxyz\n3\n1234567\n5\n";
        let (output, manager) = session(script);
        assert!(output.contains("ID not found."));
        assert!(output.contains("Invalid ID."));
        assert!(output.contains("Patron removed."));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_unknown_choice_and_end_of_input() {
        let (output, _) = session("\n9\n");
        assert!(output.contains("Please choose 1-5."));
        assert!(!output.contains("Goodbye!"));
    }

    #[test]
    fn test_empty_listing_has_no_header() {
        let (output, _) = session("\n4\n5\n");
        assert!(output.contains(EMPTY_LISTING));
        assert!(!output.contains(TABLE_HEADER));
    }
}
