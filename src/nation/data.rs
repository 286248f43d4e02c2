//! Fixed reference data for the nation

/// Regions in master order. Snapshots and save files follow this order.
pub const REGION_NAMES: [&str; 47] = [
    "Hokkaido", "Aomori", "Iwate", "Miyagi", "Akita", "Yamagata", "Fukushima", "Ibaraki",
    "Tochigi", "Gunma", "Saitama", "Chiba", "Tokyo", "Kanagawa", "Niigata", "Toyama",
    "Ishikawa", "Fukui", "Yamanashi", "Nagano", "Gifu", "Shizuoka", "Aichi", "Mie", "Shiga",
    "Kyoto", "Osaka", "Hyogo", "Nara", "Wakayama", "Tottori", "Shimane", "Okayama",
    "Hiroshima", "Yamaguchi", "Tokushima", "Kagawa", "Ehime", "Kochi", "Fukuoka", "Saga",
    "Nagasaki", "Kumamoto", "Oita", "Miyazaki", "Kagoshima", "Okinawa",
];

/// Most populous regions, seeded with census figures
pub const TOP_REGION_POPULATIONS: [(&str, u64); 5] = [
    ("Tokyo", 13_834_925),
    ("Kanagawa", 9_209_442),
    ("Osaka", 8_849_635),
    ("Aichi", 7_575_530),
    ("Saitama", 7_390_054),
];

pub const NATIONAL_POPULATION: u64 = 125_921_755;

pub const DEFAULT_LEADER_NAME: &str = "Shigeru Ishiba";
pub const DEFAULT_PARTY_NAME: &str = "Liberal Democratic Party";

pub const RIVAL_PARTY_NAMES: [&str; 3] = [
    "Constitutional Democratic Party",
    "Democratic Party for the People",
    "Nihon Ishin no Kai",
];

/// Seeded population for a region, if it is one of the census-seeded ones
pub fn seeded_population(name: &str) -> Option<u64> {
    TOP_REGION_POPULATIONS
        .iter()
        .find(|(region, _)| *region == name)
        .map(|(_, pop)| *pop)
}
