//! League of Legends service regions
//!
//! Numbers are assigned once from launch dates: the two special servers take
//! the reserved numbers 1 and 2, every other server is numbered densely from
//! [`FIRST_REGULAR_NUMBER`] in launch order, ties broken alphabetically.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::cmp::Ordering;
use std::fmt;

/// First number handed out to a non-special region. 1 ~ 9 are reserved.
pub const FIRST_REGULAR_NUMBER: i32 = 10;

const GLOBAL: &str = "Global";
const PBE: &str = "PBE";

/// A service area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: &'static str,
    /// Platform id used by the observer and status apis
    pub platform_id: &'static str,
    pub launched_at: Option<NaiveDate>,
    pub number: i32,
    host: Option<&'static str>,
}

impl Region {
    fn special(name: &'static str, platform_id: &'static str, number: i32) -> Self {
        Region {
            name,
            platform_id,
            launched_at: None,
            number,
            host: None,
        }
    }

    fn regular(name: &'static str, platform_id: &'static str, launched: (i32, u32, u32)) -> Self {
        Region {
            name,
            platform_id,
            launched_at: NaiveDate::from_ymd_opt(launched.0, launched.1, launched.2),
            number: 0,
            host: None,
        }
    }

    pub fn is_special(&self) -> bool {
        self.name == GLOBAL || self.name == PBE
    }

    pub fn is_global(&self) -> bool {
        self.name == GLOBAL
    }

    /// Hostname for api calls
    pub fn host(&self) -> String {
        match self.host {
            Some(host) => host.to_string(),
            None => format!("{}.api.pvp.net", self.name.to_lowercase()),
        }
    }

    fn special_rank(&self) -> u8 {
        match self.name {
            GLOBAL => 0,
            PBE => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn compare_regions(a: &Region, b: &Region) -> Ordering {
    a.special_rank()
        .cmp(&b.special_rank())
        .then_with(|| a.launched_at.cmp(&b.launched_at))
        .then_with(|| a.name.cmp(b.name))
}

/// Sort regions and assign numbers to every non-special region
pub fn number_regions(mut regions: Vec<Region>) -> Vec<Region> {
    regions.sort_by(compare_regions);

    let mut next = FIRST_REGULAR_NUMBER;
    for region in regions.iter_mut().filter(|r| !r.is_special()) {
        region.number = next;
        next += 1;
    }
    regions
}

fn declared_regions() -> Vec<Region> {
    vec![
        Region::special(GLOBAL, "", 1),
        Region::special(PBE, "PBE", 2),
        Region::regular("BR", "BR1", (2012, 9, 13)),
        Region::regular("EUNE", "EUN1", (2010, 7, 13)),
        Region::regular("EUW", "EUW1", (2010, 7, 13)),
        Region::regular("KR", "KR", (2011, 12, 12)),
        Region::regular("LAN", "LA1", (2013, 6, 5)),
        Region::regular("LAS", "LA2", (2013, 6, 5)),
        Region::regular("NA", "NA1", (2009, 10, 27)),
        Region::regular("OCE", "OC1", (2013, 7, 28)),
        Region::regular("TR", "TR1", (2012, 9, 27)),
        Region::regular("RU", "RU", (2013, 5, 17)),
    ]
}

static REGIONS: Lazy<Vec<Region>> = Lazy::new(|| number_regions(declared_regions()));

/// Every region, special ones first
pub fn all_regions() -> &'static [Region] {
    &REGIONS
}

/// Every region except Global
pub fn all_valid_regions() -> Vec<Region> {
    REGIONS.iter().filter(|r| !r.is_global()).cloned().collect()
}

/// Look up a region by name, ignoring ASCII case
pub fn region_by_name(name: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.name.eq_ignore_ascii_case(name))
}
