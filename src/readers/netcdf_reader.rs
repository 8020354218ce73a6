//! Reads an archive produced by [`NetcdfWriter`](crate::writers::NetcdfWriter)
//! back into memory.

use std::path::Path;

use crate::error::Result;
use crate::models::AltDataset;

#[cfg(feature = "netcdf")]
pub fn read_dataset(path: &Path) -> Result<AltDataset> {
    use crate::error::ProcessingError;
    use crate::models::GlobalAttributes;
    use crate::utils::constants::{
        CALENDAR, DIM_SITES, DIM_TIME, TIME_UNITS, VAR_ALT, VAR_LAT, VAR_LON, VAR_SITE_CODE,
        VAR_SITE_NAME, VAR_TIME, VAR_TIME_BOUNDS,
    };
    use netcdf::AttributeValue;
    use tracing::debug;

    let file = netcdf::open(path)?;

    let dimension = |name: &str| {
        file.dimension_len(name)
            .ok_or_else(|| ProcessingError::MissingData(format!("dimension '{}'", name)))
    };
    let variable = |name: &str| {
        file.variable(name)
            .ok_or_else(|| ProcessingError::MissingData(format!("variable '{}'", name)))
    };
    let text = |value: Option<netcdf::Result<AttributeValue>>, name: &str| -> Result<String> {
        match value {
            Some(value) => match value? {
                AttributeValue::Str(s) => Ok(s),
                _ => Err(ProcessingError::InvalidFormat(format!(
                    "attribute '{}' is not text",
                    name
                ))),
            },
            None => Err(ProcessingError::MissingData(format!("attribute '{}'", name))),
        }
    };
    let global =
        |name: &str| -> Result<String> { text(file.attribute(name).map(|a| a.value()), name) };

    let time_len = dimension(DIM_TIME)?;
    let site_len = dimension(DIM_SITES)?;

    let time_var = variable(VAR_TIME)?;
    let units = text(time_var.attribute_value("units"), "time:units")?;
    let calendar = text(time_var.attribute_value("calendar"), "time:calendar")?;
    if units != TIME_UNITS || calendar != CALENDAR {
        return Err(ProcessingError::InvalidFormat(format!(
            "Unsupported time encoding '{}' ({})",
            units, calendar
        )));
    }
    let time = time_var.get_values::<f64, _>(..)?;

    let time_bounds = variable(VAR_TIME_BOUNDS)?
        .get_values::<f64, _>(..)?
        .chunks_exact(2)
        .map(|pair| [pair[0], pair[1]])
        .collect();

    let strings = |name: &str| -> Result<Vec<String>> {
        let var = variable(name)?;
        (0..site_len)
            .map(|idx| var.get_string(idx).map_err(ProcessingError::from))
            .collect()
    };

    let dataset = AltDataset {
        time,
        time_bounds,
        alt: variable(VAR_ALT)?.get_values::<f64, _>(..)?,
        site_code: strings(VAR_SITE_CODE)?,
        site_name: strings(VAR_SITE_NAME)?,
        lat: variable(VAR_LAT)?.get_values::<f64, _>(..)?,
        lon: variable(VAR_LON)?.get_values::<f64, _>(..)?,
        attributes: GlobalAttributes {
            title: global("title")?,
            versions: global("versions")?,
            institutions: global("institutions")?,
            source: global("source")?,
            history: global("history")?,
            references: global("references")?,
        },
    };

    if dataset.time_len() != time_len {
        return Err(ProcessingError::InvalidFormat(format!(
            "time variable has {} values for dimension of {}",
            dataset.time_len(),
            time_len
        )));
    }
    dataset.check_shape()?;

    debug!(
        "Read {} ({} time steps, {} sites)",
        path.display(),
        time_len,
        site_len
    );

    Ok(dataset)
}

#[cfg(not(feature = "netcdf"))]
pub fn read_dataset(_path: &Path) -> Result<AltDataset> {
    Err(crate::error::ProcessingError::FeatureDisabled)
}

#[cfg(all(test, feature = "netcdf"))]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use crate::models::GlobalAttributes;
    use crate::writers::NetcdfWriter;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let original = AltDataset {
            time: vec![51282.5, 51647.5, 52012.5],
            time_bounds: vec![
                [51100.0, 51465.0],
                [51465.0, 51830.0],
                [51830.0, 52195.0],
            ],
            alt: vec![41.0, f64::NAN, 43.5, 50.0, f64::NAN, f64::NAN],
            site_code: vec!["R1".into(), " R40 ".into()],
            site_name: vec!["Talnik".into(), "Andryushkino".into()],
            lat: vec![69.4, 69.2],
            lon: vec![88.3, f64::NAN],
            attributes: GlobalAttributes {
                title: "CALM".into(),
                versions: "2022".into(),
                institutions: "GWU".into(),
                source: "https://example.org/x.xls".into(),
                history: "Downloaded on 2024-01-01".into(),
                references: "\n@ARTICLE{CALM}".into(),
            },
        };
        let temp_dir = TempDir::new().unwrap();
        let path = NetcdfWriter::new().write(&original, temp_dir.path()).unwrap();

        let read = read_dataset(&path).unwrap();

        assert_eq!(read.time, original.time);
        assert_eq!(read.time_bounds, original.time_bounds);
        assert_eq!(read.site_code, original.site_code);
        assert_eq!(read.site_name, original.site_name);
        assert_eq!(read.attributes, original.attributes);
        assert_eq!(read.years().unwrap(), vec![1990, 1991, 1992]);
        for t in 0..3 {
            for s in 0..2 {
                assert_eq!(read.value(t, s), original.value(t, s));
            }
        }
        assert!(read.lon[1].is_nan());
    }

    #[test]
    fn test_missing_file() {
        let result = read_dataset(Path::new("/nonexistent/CALM_1990-2022.nc"));
        assert!(matches!(result, Err(ProcessingError::NetCdf(_))));
    }
}
