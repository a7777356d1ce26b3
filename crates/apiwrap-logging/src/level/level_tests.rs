#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(LogLevel::Trace, LevelFilter::TRACE ; "trace")]
#[test_case(LogLevel::Debug, LevelFilter::DEBUG ; "debug")]
#[test_case(LogLevel::Info, LevelFilter::INFO ; "info")]
#[test_case(LogLevel::Warn, LevelFilter::WARN ; "warn")]
#[test_case(LogLevel::Error, LevelFilter::ERROR ; "error")]
#[test_case(LogLevel::Off, LevelFilter::OFF ; "off")]
fn level_filter___maps_each_level(level: LogLevel, expected: LevelFilter) {
    assert_eq!(level_filter(level), expected);
}

#[test_case(Level::TRACE, LogLevel::Trace ; "trace")]
#[test_case(Level::DEBUG, LogLevel::Debug ; "debug")]
#[test_case(Level::INFO, LogLevel::Info ; "info")]
#[test_case(Level::WARN, LogLevel::Warn ; "warn")]
#[test_case(Level::ERROR, LogLevel::Error ; "error")]
fn from_tracing_level___maps_each_level(level: Level, expected: LogLevel) {
    assert_eq!(from_tracing_level(&level), expected);
}

#[test]
fn from_tracing_level___round_trips_through_level_filter() {
    for level in [Level::TRACE, Level::DEBUG, Level::INFO, Level::WARN, Level::ERROR] {
        assert_eq!(level_filter(from_tracing_level(&level)), LevelFilter::from_level(level));
    }
}
