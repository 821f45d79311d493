//! Property tests for the filtering rules.

use itertools::iproduct;
use proptest::prelude::*;
use srclog::{Facility, LogLevel, SourceFilter, SourceRegistry, TwoLevelFilter};

fn threshold() -> impl Strategy<Value = LogLevel> {
    (1u8..LogLevel::COUNT).prop_map(|rank| LogLevel::from_u8(rank).unwrap_or(LogLevel::None))
}

fn requestable() -> impl Strategy<Value = LogLevel> {
    (1u8..LogLevel::COUNT - 1).prop_map(|rank| LogLevel::from_u8(rank).unwrap_or(LogLevel::Error))
}

proptest! {
    #[test]
    fn allowed_levels_stay_allowed_when_raised(
        global in threshold(),
        source in threshold(),
        low in requestable(),
        high in requestable(),
    ) {
        prop_assume!(low <= high);
        let mut registry = SourceRegistry::new();
        registry.register("SRC", source).expect("register");
        let filter = TwoLevelFilter::new(global, &registry);
        if filter.should_log("SRC", low) {
            prop_assert!(filter.should_log("SRC", high));
        }
    }

    #[test]
    fn decision_is_the_conjunction_of_both_gates(
        global in threshold(),
        source in threshold(),
        level in requestable(),
    ) {
        let facility = Facility::with_writer(std::io::sink());
        facility.init(global, true).expect("init");
        facility.register("SRC", source).expect("register");
        prop_assert_eq!(
            facility.will_be_printed("SRC", level),
            level >= global && level >= source
        );
        prop_assert!(!facility.will_be_printed("OTHER", level));
    }

    #[test]
    fn registration_round_trips(name in "[A-Za-z0-9_.]{1,128}", level in threshold()) {
        let facility = Facility::with_writer(std::io::sink());
        facility.init(LogLevel::Info, false).expect("init");
        facility.register(&name, level).expect("register");
        prop_assert_eq!(facility.get_source_level(&name), level);
        prop_assert_eq!(facility.unregister(&name), Some(level));
        prop_assert_eq!(facility.get_source_level(&name), LogLevel::Invalid);
    }
}

#[test]
fn levels_below_both_thresholds_are_always_denied() {
    for (global, source, level) in iproduct!(LogLevel::ALL, LogLevel::ALL, LogLevel::ALL) {
        if !global.is_threshold() || !source.is_threshold() {
            continue;
        }
        let mut registry = SourceRegistry::new();
        registry.register("SRC", source).expect("register");
        let allowed = TwoLevelFilter::new(global, &registry).should_log("SRC", level);
        if level < global && level < source {
            assert!(!allowed, "{level} passed {global}/{source}");
        }
        if allowed {
            assert!(level.is_requestable());
        }
    }
}
