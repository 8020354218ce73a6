use crate::error::{ProcessingError, Result};
use crate::utils::constants::NETCDF_EXTENSION;

/// Output filename with format: {prefix}_{start}-{end}.nc
pub fn output_file_name(prefix: &str, start_year: i32, end_year: i32) -> String {
    format!("{}_{}-{}.{}", prefix, start_year, end_year, NETCDF_EXTENSION)
}

/// Local filename for a remote source: the last path segment of the URL
pub fn source_file_name(url: &str) -> Result<String> {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() && !name.contains(':') => Ok(name.to_string()),
        _ => Err(ProcessingError::InvalidFormat(format!(
            "Cannot derive a file name from URL '{}'",
            url
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::CALM_SOURCE_URL;

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("CALM", 1990, 2022), "CALM_1990-2022.nc");
        assert_eq!(output_file_name("alt", 2000, 2000), "alt_2000-2000.nc");
    }

    #[test]
    fn test_source_file_name() {
        assert_eq!(
            source_file_name(CALM_SOURCE_URL).unwrap(),
            "CALM_Summary_table.xls"
        );
        assert_eq!(
            source_file_name("https://example.org/data/table.xlsx?raw=1").unwrap(),
            "table.xlsx"
        );
    }

    #[test]
    fn test_source_file_name_without_path() {
        assert!(source_file_name("https://").is_err());
        assert!(source_file_name("").is_err());
    }
}
