use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result;
use crate::models::AltDataset;
use crate::utils::constants::DEFAULT_OUTPUT_PREFIX;

#[cfg(feature = "netcdf")]
use crate::utils::constants::{
    ALT_LONG_NAME, ALT_UNITS, CALENDAR, DIM_BOUNDS, DIM_SITES, DIM_TIME, SITE_CODE_LONG_NAME,
    SITE_NAME_LONG_NAME, TIME_UNITS, VAR_ALT, VAR_LAT, VAR_LON, VAR_SITE_CODE, VAR_SITE_NAME,
    VAR_TIME, VAR_TIME_BOUNDS,
};

pub struct NetcdfWriter {
    prefix: String,
}

impl NetcdfWriter {
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Write into `dir` under the `{prefix}_{start}-{end}.nc` name, replacing
    /// any file of the same name
    pub fn write(&self, dataset: &AltDataset, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(dataset.file_name(&self.prefix)?);
        fs::create_dir_all(dir)?;

        self.write_to(dataset, &path)?;
        info!(
            "Wrote {} ({} time steps, {} sites)",
            path.display(),
            dataset.time_len(),
            dataset.site_len()
        );

        Ok(path)
    }

    #[cfg(feature = "netcdf")]
    pub fn write_to(&self, dataset: &AltDataset, path: &Path) -> Result<()> {
        use netcdf::types::NcVariableType;

        dataset.check_shape()?;

        let mut file = netcdf::create(path)?;

        let attrs = &dataset.attributes;
        file.add_attribute("title", attrs.title.as_str())?;
        file.add_attribute("versions", attrs.versions.as_str())?;
        file.add_attribute("institutions", attrs.institutions.as_str())?;
        file.add_attribute("source", attrs.source.as_str())?;
        file.add_attribute("history", attrs.history.as_str())?;
        file.add_attribute("references", attrs.references.as_str())?;

        file.add_dimension(DIM_TIME, dataset.time_len())?;
        file.add_dimension(DIM_SITES, dataset.site_len())?;
        file.add_dimension(DIM_BOUNDS, 2)?;

        {
            let mut time_var = file.add_variable::<f64>(VAR_TIME, &[DIM_TIME])?;
            time_var.put_attribute("units", TIME_UNITS)?;
            time_var.put_attribute("calendar", CALENDAR)?;
            time_var.put_attribute("bounds", VAR_TIME_BOUNDS)?;
            time_var.put_values(&dataset.time, ..)?;
        }

        {
            let mut bounds_var =
                file.add_variable::<f64>(VAR_TIME_BOUNDS, &[DIM_TIME, DIM_BOUNDS])?;
            bounds_var.put_attribute("units", TIME_UNITS)?;
            bounds_var.put_attribute("calendar", CALENDAR)?;
            bounds_var.put_values(&dataset.flat_time_bounds(), ..)?;
        }

        {
            let mut alt_var = file.add_variable::<f64>(VAR_ALT, &[DIM_TIME, DIM_SITES])?;
            alt_var.set_fill_value(f64::NAN)?;
            alt_var.put_attribute("long_name", ALT_LONG_NAME)?;
            alt_var.put_attribute("units", ALT_UNITS)?;
            alt_var.put_values(&dataset.alt, ..)?;
        }

        let string_vars = [
            (VAR_SITE_CODE, SITE_CODE_LONG_NAME, &dataset.site_code),
            (VAR_SITE_NAME, SITE_NAME_LONG_NAME, &dataset.site_name),
        ];
        for (name, long_name, values) in string_vars {
            let mut var =
                file.add_variable_with_type(name, &[DIM_SITES], &NcVariableType::String)?;
            var.put_attribute("long_name", long_name)?;
            for (idx, value) in values.iter().enumerate() {
                var.put_string(value, idx)?;
            }
        }

        let coordinates = [
            (VAR_LAT, "latitude", "degrees_north", &dataset.lat),
            (VAR_LON, "longitude", "degrees_east", &dataset.lon),
        ];
        for (name, standard_name, units, values) in coordinates {
            let mut var = file.add_variable::<f64>(name, &[DIM_SITES])?;
            var.put_attribute("standard_name", standard_name)?;
            var.put_attribute("units", units)?;
            var.put_values(values, ..)?;
        }

        Ok(())
    }

    #[cfg(not(feature = "netcdf"))]
    pub fn write_to(&self, _dataset: &AltDataset, _path: &Path) -> Result<()> {
        Err(crate::error::ProcessingError::FeatureDisabled)
    }
}

impl Default for NetcdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, feature = "netcdf"))]
mod tests {
    use super::*;
    use crate::models::GlobalAttributes;
    use tempfile::TempDir;

    fn dataset() -> AltDataset {
        AltDataset {
            time: vec![54932.5, 55297.5],
            time_bounds: vec![[54750.0, 55115.0], [55115.0, 55480.0]],
            alt: vec![15.0, f64::NAN, f64::NAN, 30.0],
            site_code: vec!["U1".into(), "R2".into()],
            site_name: vec!["Barrow".into(), "Talnik".into()],
            lat: vec![71.3, 69.5],
            lon: vec![-156.6, 88.0],
            attributes: GlobalAttributes {
                title: "t".into(),
                versions: "2022".into(),
                institutions: "i".into(),
                source: "s".into(),
                history: "h".into(),
                references: "r".into(),
            },
        }
    }

    #[test]
    fn test_write_names_file_by_year_span() {
        let temp_dir = TempDir::new().unwrap();
        let path = NetcdfWriter::new()
            .with_prefix("TEST")
            .write(&dataset(), temp_dir.path())
            .unwrap();

        assert_eq!(path, temp_dir.path().join("TEST_2000-2001.nc"));
        assert!(path.exists());
    }

    #[test]
    fn test_write_rejects_bad_shape() {
        let temp_dir = TempDir::new().unwrap();
        let mut ds = dataset();
        ds.alt.pop();

        let result = NetcdfWriter::new().write_to(&ds, &temp_dir.path().join("bad.nc"));
        assert!(result.is_err());
    }
}
