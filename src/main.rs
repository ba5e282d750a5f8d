//! # Placard CLI
//!
//! Usage:
//!   placard job.json -o sheet.json
//!   echo '{ ... }' | placard -o sheet.json
//!   placard --example > job.json

use std::env;
use std::fs;
use std::io::{self, Read};

use placard::print::{JsonPrinter, Printer};
use placard::{Composer, ComposerConfig};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Handle --example flag
    if args.iter().any(|a| a == "--example") {
        print!("{}", example_job_json());
        return;
    }

    // Read input
    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).expect("Failed to read input file")
    } else {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).expect("Failed to read stdin");
        buf
    };

    // Parse output path
    let output_path = args
        .windows(2)
        .find(|w| w[0] == "-o")
        .map(|w| w[1].clone())
        .unwrap_or_else(|| "sheet.json".to_string());

    // Compose
    let composer = Composer::new(ComposerConfig::default());
    match composer.compose_json(&input) {
        Ok(sheet) => {
            let file = fs::File::create(&output_path).expect("Failed to create output file");
            let mut printer = JsonPrinter::new(io::BufWriter::new(file));
            printer.print(&sheet).expect("Failed to write sheet");
            eprintln!(
                "✓ Composed {} cards onto {} pages, written to {}",
                sheet.card_count(),
                sheet.pages.len(),
                output_path
            );
        }
        Err(e) => {
            eprintln!("✗ Failed to compose sheet: {}", e);
            std::process::exit(1);
        }
    }
}

fn example_job_json() -> &'static str {
    r##"{
  "role": "Student",
  "gridGap": 20,
  "page": "A4",
  "template": {
    "title": "Green Valley School",
    "logo": "uploads/logo.png",
    "backgroundImage": "uploads/card-bg.png",
    "signature": "uploads/principal-sig.png",
    "width": 54,
    "height": 86,
    "adminLayout": "Vertical",
    "spacingTop": 3,
    "spacingBottom": 3,
    "spacingLeft": 3,
    "spacingRight": 3,
    "userPhotoStyle": "Circle",
    "userPhotoSizeWidth": 21,
    "userPhotoSizeHeight": 21,
    "showPhoto": true,
    "showName": true,
    "showId": true,
    "showClass": true,
    "showPhone": true,
    "showSignature": true
  },
  "users": [
    {
      "firstName": "Asha",
      "lastName": "Rao",
      "admissionNumber": "2024-011",
      "class": { "name": "5" },
      "phone": "9998887777",
      "photo": "uploads/students/asha.jpg"
    },
    {
      "firstName": "Vikram",
      "lastName": "Shah",
      "admissionNo": "2024-012",
      "class": { "name": "5" },
      "guardianPhone": "8887776666"
    },
    {
      "name": "Meera Pillai",
      "admissionNumber": "2024-013",
      "class": { "name": "6" },
      "phone": "7776665555",
      "image": "uploads\\students\\meera.jpg"
    }
  ]
}"##
}
