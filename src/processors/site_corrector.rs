use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ProcessingError, Result};
use crate::models::SiteRecord;
use crate::utils::constants::{
    CORRECTED_SITE_NAME, LATITUDE_CORRECTION_OFFSET, LATITUDE_CORRECTION_THRESHOLD,
};

/// A latitude that was shifted by the corrector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatitudeCorrection {
    pub site: String,
    pub original: f64,
    pub corrected: f64,
}

/// Fixes the one known coordinate transcription error in the source table:
/// a site recorded with its latitude 60 degrees too far south.
pub struct SiteCorrector {
    site_name: String,
    threshold: f64,
    offset: f64,
}

impl SiteCorrector {
    pub fn new() -> Self {
        Self {
            site_name: CORRECTED_SITE_NAME.to_string(),
            threshold: LATITUDE_CORRECTION_THRESHOLD,
            offset: LATITUDE_CORRECTION_OFFSET,
        }
    }

    /// The site must appear exactly once. Its latitude is shifted only when
    /// below the threshold.
    pub fn apply(&self, sites: &mut [SiteRecord]) -> Result<Option<LatitudeCorrection>> {
        let mut matches = sites.iter_mut().filter(|s| s.name == self.site_name);

        let site = match (matches.next(), matches.count()) {
            (Some(site), 0) => site,
            (first, rest) => {
                let found = rest + usize::from(first.is_some());
                return Err(ProcessingError::SiteLookup {
                    name: self.site_name.clone(),
                    matches: found,
                });
            }
        };

        if site.latitude < self.threshold {
            let original = site.latitude;
            site.latitude += self.offset;
            info!(
                "Corrected latitude of {} from {} to {}",
                site.name, original, site.latitude
            );
            Ok(Some(LatitudeCorrection {
                site: site.name.clone(),
                original,
                corrected: site.latitude,
            }))
        } else {
            warn!(
                "Latitude of {} is already {}, no correction applied",
                site.name, site.latitude
            );
            Ok(None)
        }
    }
}

impl Default for SiteCorrector {
    fn default() -> Self {
        Self::new()
    }
}
