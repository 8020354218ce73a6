use serde::{Deserialize, Serialize};

/// Identity fields of one CALM monitoring site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub code: String,
    pub name: String,
    pub method: Option<String>,
    /// Degrees north, NaN when the sheet leaves it blank
    pub latitude: f64,
    /// Degrees east, NaN when the sheet leaves it blank
    pub longitude: f64,
}

impl SiteRecord {
    pub fn new(code: String, name: String, latitude: f64, longitude: f64) -> Self {
        Self {
            code,
            name,
            method: None,
            latitude,
            longitude,
        }
    }

    pub fn with_method(mut self, method: Option<String>) -> Self {
        self.method = method;
        self
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_record() {
        let site = SiteRecord::new("R1".to_string(), "Barrow".to_string(), 71.3, -156.6)
            .with_method(Some("grid".to_string()));

        assert_eq!(site.method.as_deref(), Some("grid"));
        assert!(site.has_coordinates());
    }

    #[test]
    fn test_missing_coordinates() {
        let site = SiteRecord::new("R2".to_string(), "Unknown".to_string(), f64::NAN, 10.0);
        assert!(!site.has_coordinates());
    }
}
