use chrono::Weekday;
use chrono::Weekday::{Fri, Mon, Sat, Sun, Thu, Tue, Wed};

pub const ALL_WEEKDAYS: [Weekday; 7] = [Mon, Tue, Wed, Thu, Fri, Sat, Sun];

/// How a province schedules its drawings. Daily provinces report gaps in
/// days; periodic provinces report gaps in draw periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawClass {
    Daily,
    Periodic(&'static [Weekday]),
}

/// Unit a gap is expressed in. For daily provinces the two are numerically
/// identical; the distinction only matters for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapUnit {
    Days,
    Periods,
}

impl std::fmt::Display for GapUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GapUnit::Days => write!(f, "days"),
            GapUnit::Periods => write!(f, "periods"),
        }
    }
}

impl DrawClass {
    pub fn weekdays(&self) -> &'static [Weekday] {
        match self {
            DrawClass::Daily => &ALL_WEEKDAYS,
            DrawClass::Periodic(days) => days,
        }
    }

    pub fn is_draw_day(&self, weekday: Weekday) -> bool {
        match self {
            DrawClass::Daily => true,
            DrawClass::Periodic(days) => days.contains(&weekday),
        }
    }

    pub fn draws_per_week(&self) -> u32 {
        self.weekdays().len() as u32
    }

    pub fn is_daily(&self) -> bool {
        matches!(self, DrawClass::Daily)
    }

    pub fn gap_unit(&self) -> GapUnit {
        match self {
            DrawClass::Daily => GapUnit::Days,
            DrawClass::Periodic(_) => GapUnit::Periods,
        }
    }
}

/// The northern draw (XSMB) runs every day of the week.
const DAILY_PROVINCES: &[&str] = &["mien-bac"];

/// Southern and central provinces, one to two fixed weekdays each.
const PERIODIC_SCHEDULES: &[(&str, &[Weekday])] = &[
    // South
    ("tp-hcm", &[Mon, Sat]),
    ("dong-thap", &[Mon]),
    ("ca-mau", &[Mon]),
    ("ben-tre", &[Tue]),
    ("vung-tau", &[Tue]),
    ("bac-lieu", &[Tue]),
    ("dong-nai", &[Wed]),
    ("can-tho", &[Wed]),
    ("soc-trang", &[Wed]),
    ("tay-ninh", &[Thu]),
    ("an-giang", &[Thu]),
    ("binh-thuan", &[Thu]),
    ("vinh-long", &[Fri]),
    ("binh-duong", &[Fri]),
    ("tra-vinh", &[Fri]),
    ("long-an", &[Sat]),
    ("binh-phuoc", &[Sat]),
    ("hau-giang", &[Sat]),
    ("tien-giang", &[Sun]),
    ("kien-giang", &[Sun]),
    ("da-lat", &[Sun]),
    // Central
    ("phu-yen", &[Mon]),
    ("hue", &[Mon, Sun]),
    ("dak-lak", &[Tue]),
    ("quang-nam", &[Tue]),
    ("da-nang", &[Wed, Sat]),
    ("khanh-hoa", &[Wed, Sun]),
    ("binh-dinh", &[Thu]),
    ("quang-tri", &[Thu]),
    ("quang-binh", &[Thu]),
    ("gia-lai", &[Fri]),
    ("ninh-thuan", &[Fri]),
    ("quang-ngai", &[Sat]),
    ("dak-nong", &[Sat]),
    ("kon-tum", &[Sun]),
];

/// Looks up the draw class for a province. Unknown identifiers fall back to
/// a daily schedule so their analysis window is never silently shrunk.
pub fn schedule_for(province_id: &str) -> DrawClass {
    if DAILY_PROVINCES.contains(&province_id) {
        return DrawClass::Daily;
    }
    for (id, days) in PERIODIC_SCHEDULES {
        if *id == province_id {
            return DrawClass::Periodic(days);
        }
    }
    DrawClass::Daily
}

pub fn weekdays_for(province_id: &str) -> &'static [Weekday] {
    schedule_for(province_id).weekdays()
}

pub fn is_daily_draw(province_id: &str) -> bool {
    schedule_for(province_id).is_daily()
}

pub fn draws_per_week(province_id: &str) -> u32 {
    schedule_for(province_id).draws_per_week()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mien_bac_is_daily() {
        assert!(is_daily_draw("mien-bac"));
        assert_eq!(draws_per_week("mien-bac"), 7);
        assert_eq!(weekdays_for("mien-bac").len(), 7);
    }

    #[test]
    fn test_tp_hcm_draws_twice_weekly() {
        assert!(!is_daily_draw("tp-hcm"));
        assert_eq!(draws_per_week("tp-hcm"), 2);
        assert_eq!(weekdays_for("tp-hcm"), &[Mon, Sat]);
    }

    #[test]
    fn test_weekly_province() {
        assert_eq!(draws_per_week("binh-dinh"), 1);
        assert_eq!(weekdays_for("binh-dinh"), &[Thu]);
        assert!(schedule_for("binh-dinh").is_draw_day(Thu));
        assert!(!schedule_for("binh-dinh").is_draw_day(Fri));
    }

    #[test]
    fn test_unknown_province_falls_back_to_daily() {
        assert!(is_daily_draw("atlantis"));
        assert_eq!(draws_per_week("atlantis"), 7);
    }

    #[test]
    fn test_registry_covers_all_provinces() {
        // 1 daily region + 35 periodic provinces.
        assert_eq!(DAILY_PROVINCES.len() + PERIODIC_SCHEDULES.len(), 36);
        for (id, days) in PERIODIC_SCHEDULES {
            assert!(!days.is_empty(), "{} has no draw days", id);
            assert!(days.len() < 7, "{} should not be periodic", id);
        }
    }

    #[test]
    fn test_gap_unit_per_class() {
        assert_eq!(schedule_for("mien-bac").gap_unit(), GapUnit::Days);
        assert_eq!(schedule_for("ca-mau").gap_unit(), GapUnit::Periods);
    }
}
