//! Shared fixtures for generator tests.

use worldmap_records::Classified;
use worldmap_records::classify::classify_reader;
use worldmap_settings::{Settings, parse_settings_toml};

pub const HEADER: &str = "Type,URL,Title,Start Year,End Year,Historic Lat,Historic Lon,\
Present Lat,Present Lon,Category,Sub Category,Date Range,Description,\
Historic Location,Present Location,Source,GeoJSON\n";

/// Two base maps, three markers (one of each temporal kind) and a shape.
pub const ROWS: &str = "\
Map,tiles/1800/{z}/{x}/{y}.png,1800,1775,1820,,,,,,,,,,,,
Map,tiles/1850/{z}/{x}/{y}.png,1850,1821,1861,,,,,,,,,,,,
Marker,,Fort Snelling,1850,,44.89,-93.18,44.89,-93.18,Military,Forts,,,,,,
Marker,,Canton Consulate,1850,1850,,,23.1,113.2,Trade,Consulates,,,,,,
Marker,,Fort Vancouver,1825,1860,,,45.6,-122.6,Military,Forts,,,,,,
Shape,,Oregon Country,1818,1846,,,,,Territory,Claims,,,,,,\"{\"\"type\"\":\"\"Polygon\"\"}\"
";

pub const STAMP: &str = "2014-03-07@09:05:02";

/// Settings with the required keys plus `extra` TOML appended.
pub fn settings(extra: &str) -> Settings {
    parse_settings_toml(&format!(
        "app_path = \"http://example.org/map/\"\ngdoc_id = \"doc\"\n{extra}"
    ))
    .unwrap()
}

pub fn csv() -> String {
    format!("{HEADER}{ROWS}")
}

pub fn classified() -> Classified {
    classify_reader(csv().as_bytes()).unwrap()
}
