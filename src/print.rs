//! Print backends.
//!
//! The composer stops at a [`SheetLayout`]; a [`Printer`] takes it from
//! there. The built-in [`JsonPrinter`] serializes the sheet for a
//! downstream driver (a browser print dialog, a card printer spooler),
//! which is the only backend this crate ships.

use std::io::Write;

use crate::error::PlacardError;
use crate::layout::SheetLayout;

/// A destination for a composed sheet.
pub trait Printer {
    fn print(&mut self, sheet: &SheetLayout) -> Result<(), PlacardError>;
}

/// Writes the sheet as pretty-printed JSON.
pub struct JsonPrinter<W: Write> {
    writer: W,
}

impl<W: Write> JsonPrinter<W> {
    pub fn new(writer: W) -> Self {
        JsonPrinter { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Printer for JsonPrinter<W> {
    fn print(&mut self, sheet: &SheetLayout) -> Result<(), PlacardError> {
        serde_json::to_writer_pretty(&mut self.writer, sheet)
            .map_err(|e| PlacardError::Print(format!("failed to serialize sheet: {e}")))?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| PlacardError::Print(format!("failed to write sheet: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compose_sheet;
    use crate::model::PageSize;

    #[test]
    fn test_json_printer_writes_valid_json() {
        let sheet = compose_sheet(vec![], 54.0, 86.0, None, PageSize::A4);
        let mut printer = JsonPrinter::new(Vec::new());
        printer.print(&sheet).unwrap();

        let out = printer.into_inner();
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["pageWidthMm"], 210.0);
        assert!(parsed["pages"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_printer_trait_is_object_safe() {
        let sheet = compose_sheet(vec![], 54.0, 86.0, None, PageSize::A4);
        let mut printer = JsonPrinter::new(Vec::new());
        let dyn_printer: &mut dyn Printer = &mut printer;
        dyn_printer.print(&sheet).unwrap();
        assert!(!printer.into_inner().is_empty());
    }
}
