use std::{fs, path::PathBuf};

/// # Errors
///
/// Will return `Err` if the file is not readable
pub fn check_readable_file(file: &str) -> Result<String, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The file '{file}' is not readable."));
    }
    Ok(file.to_string())
}

/// # Errors
///
/// Will return `Err` unless the value is a hole number between 1 and 18
pub fn check_hole_number(value: &str) -> Result<u8, String> {
    let hole: u8 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a hole number."))?;
    if (1..=18).contains(&hole) {
        Ok(hole)
    } else {
        Err(format!("Hole {hole} is out of range, expected 1-18."))
    }
}

/// # Errors
///
/// Will return `Err` if the database name is empty or its directory does not exist
pub fn check_db_name(db_name: &str) -> Result<(), String> {
    if db_name.trim().is_empty() {
        return Err("Database name is required.".to_string());
    }
    let path = PathBuf::from(db_name);
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => Err(format!(
            "The directory '{}' for the database does not exist.",
            dir.display()
        )),
        _ => Ok(()),
    }
}
