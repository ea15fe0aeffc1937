#[allow(dead_code)]
#[path = "converter/table.rs"]
mod table;

use itertools::Itertools;
use std::env;
use std::ffi::OsStr;
use std::fs;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Write;
use std::path::PathBuf;

use table::Table;

const PATH_DATABASE: &str = "src/database";
const FILENAME_DATA_TABLE: &str = "table.obj";

/// Builds the gem table from the gem database.
fn main() {
    let mut path_output = PathBuf::from(env::var("OUT_DIR").unwrap());
    path_output.push(FILENAME_DATA_TABLE);

    // Track changes in the database directory.
    println!("cargo:rerun-if-changed={}", PATH_DATABASE);

    // Specify location of the gem table.
    println!("cargo:rustc-env=PATH_DATA_TABLE={}", path_output.display());

    // Find the database files. These are the files in the database directory
    // that have the .dat extension. Gem classes are ordered, so the files are
    // read in name order.
    let paths = fs::read_dir(PATH_DATABASE).unwrap()
    .map(|entry| entry.unwrap())
    .map(|entry| entry.path())
    .filter(|path| path.is_file())
    .filter(|path| path.extension() == Some(OsStr::new("dat")))
    .sorted();

    let mut lines = Vec::with_capacity(100);

    for path in paths {
        let file = File::open(&path).unwrap();

        for (line, number)
        in BufReader::new(file).lines().map(Result::unwrap).zip(1..) {
            lines.push((line, format!("{}", path.display()), number));
        }
    }

    let input = lines.iter().map(|(line, _, _)| line).join("\n");

    let table = input.parse::<Table>().unwrap_or_else(|error| {
        const DELIMITER: char = ':';

        let message_error_upstream = format!("{}", error);

        // Map the line number in the joined input back to its file.
        let location = message_error_upstream.split_once(DELIMITER)
        .and_then(|(string_number_line, message_error)| {
            let number_line = string_number_line.parse::<usize>().ok()?;
            let (_, path, number_line) = lines.get(number_line.checked_sub(1)?)?;

            Some((path, number_line, message_error))
        });

        eprintln!();
        eprintln!("Error parsing database files:");

        match location {
            Some((path, number_line, message_error)) => {
                eprintln!("{}:{}:{}", path, number_line, message_error);
            }
            None => {
                eprintln!("{}: {}", PATH_DATABASE, message_error_upstream);
            }
        }

        eprintln!();

        panic!("Error parsing database files");
    });

    let data_table = bincode::serialize(&table).unwrap();

    let mut file_output = File::create(&path_output).unwrap();

    file_output.write_all(&data_table).unwrap();
}
