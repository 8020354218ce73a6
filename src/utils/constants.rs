use crate::models::RowBlock;

/// Source spreadsheet
pub const CALM_SOURCE_URL: &str =
    "https://www2.gwu.edu/~calm/data/CALM_Data/CALM_Summary_table.xls";

/// Output naming
pub const DEFAULT_OUTPUT_PREFIX: &str = "CALM";
pub const NETCDF_EXTENSION: &str = "nc";

/// Configuration file looked up in the working directory
pub const CONFIG_FILE_STEM: &str = "calm-processor";
pub const CONFIG_ENV_PREFIX: &str = "CALM";

/// Region blocks of the summary table, as 1-based worksheet rows of the first
/// and last data row. These match the 2022 revision of the spreadsheet only; a
/// revision that shifts rows will be read without complaint and yield a wrong
/// table.
pub const CALM_ROW_BLOCKS: [RowBlock; 19] = [
    RowBlock::new(31, 72),
    RowBlock::new(76, 99),
    RowBlock::new(103, 104),
    RowBlock::new(108, 142),
    RowBlock::new(147, 152),
    RowBlock::new(156, 178),
    RowBlock::new(182, 195),
    RowBlock::new(199, 224),
    RowBlock::new(228, 233),
    RowBlock::new(237, 239),
    RowBlock::new(244, 246),
    RowBlock::new(250, 250),
    RowBlock::new(254, 257),
    RowBlock::new(261, 264),
    RowBlock::new(268, 269),
    RowBlock::new(273, 284),
    RowBlock::new(289, 335),
    RowBlock::new(339, 349),
    RowBlock::new(353, 355),
];

/// Rows between a block's header row and its first data row
pub const HEADER_ROW_OFFSET: u32 = 1;

/// Header renames for positional and placeholder columns
pub const NAME_RENAMES: [(&str, &str); 3] = [
    ("Unnamed: 0", COL_SITE_CODE),
    ("Unnamed: 1", COL_SITE_NAME),
    ("Unnamed: 4", COL_METHOD),
];
pub const YEAR_RENAMES: [(&str, i32); 5] = [
    ("###", 1992),
    ("###.1", 1993),
    ("###.2", 1994),
    ("###.3", 1995),
    ("###.4", 1997),
];

/// Identity columns
pub const COL_SITE_CODE: &str = "Site Code";
pub const COL_SITE_NAME: &str = "Site Name";
pub const COL_METHOD: &str = "Method";
pub const COL_LATITUDE: &str = "LAT";
pub const COL_LONGITUDE: &str = "LONG";

/// Cell cleaning
pub const MISSING_SENTINELS: [&str; 2] = ["-", "inactive"];
pub const DECORATION_CHARS: [char; 3] = ['*', '<', '>'];

/// Known transcription error in the source
pub const CORRECTED_SITE_NAME: &str = "Andryushkino";
pub const LATITUDE_CORRECTION_THRESHOLD: f64 = 60.0;
pub const LATITUDE_CORRECTION_OFFSET: f64 = 60.0;

/// Time encoding
pub const EPOCH_YEAR: i32 = 1850;
pub const DAYS_PER_YEAR: i32 = 365;
pub const TIME_UNITS: &str = "days since 1850-01-01";
pub const CALENDAR: &str = "noleap";

/// NetCDF dimension names
pub const DIM_TIME: &str = "time";
pub const DIM_SITES: &str = "sites";
pub const DIM_BOUNDS: &str = "nb";

/// NetCDF variable names
pub const VAR_ALT: &str = "alt";
pub const VAR_TIME: &str = "time";
pub const VAR_TIME_BOUNDS: &str = "time_bnds";
pub const VAR_SITE_CODE: &str = "site_code";
pub const VAR_SITE_NAME: &str = "site_name";
pub const VAR_LAT: &str = "lat";
pub const VAR_LON: &str = "lon";

/// Variable attributes
pub const ALT_LONG_NAME: &str = "Average thaw depth at end-of-season";
pub const ALT_UNITS: &str = "cm";
pub const SITE_CODE_LONG_NAME: &str = "CALM site code";
pub const SITE_NAME_LONG_NAME: &str = "CALM site name";

/// Global attributes
pub const DATASET_TITLE: &str = "CALM: Circumpolar Active Layer Monitoring Network";
pub const DATASET_VERSION: &str = "2022";
pub const DATASET_INSTITUTION: &str = "The George Washington University";
pub const DATASET_REFERENCES: &str = "
@ARTICLE{CALM,
  author = {CALM},
  title = {Circumpolar Active Layer Monitoring Network-CALM: Long-Term Observations of the Climate-Active Layer-Permafrost System.},
  journal = {online},
  url = {https://www2.gwu.edu/~calm/}
}";
