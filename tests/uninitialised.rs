//! A process whose facility is never initialised.

use srclog::{FacilityError, LogLevel, SourceDescriptor, srclog_error, srclog_raw};

#[test]
fn every_operation_is_refused_or_ignored() {
    assert!(!srclog::facility().is_initialised());
    assert_eq!(
        srclog::register("NET", LogLevel::Debug),
        Err(FacilityError::NotInitialised)
    );
    assert_eq!(
        srclog::register_many(&[SourceDescriptor::new("NET", LogLevel::Debug)]),
        Err(FacilityError::NotInitialised)
    );
    assert_eq!(
        srclog::set_global_level(LogLevel::Debug),
        Err(FacilityError::NotInitialised)
    );
    assert_eq!(srclog::unregister("NET"), None);
    assert_eq!(srclog::get_source_level("NET"), LogLevel::Invalid);
    assert_eq!(srclog::get_global_level(), LogLevel::Invalid);
    assert!(!srclog::will_be_printed("NET", LogLevel::Error));
    assert_eq!(srclog::dump_sources(), Err(FacilityError::NotInitialised));
    assert_eq!(srclog::teardown(), Ok(()));

    srclog_error!("NET", "dropped");
    srclog_raw!("NET", b"dropped");
    assert!(!srclog::facility().is_initialised());
}
