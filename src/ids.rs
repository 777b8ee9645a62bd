//! Derivations between the archive's composite identifiers.
//!
//! Title ids embed their episode id, and episode ids are zero-padded dates,
//! so season membership falls out of the air date. Seasons turn over between
//! August and September; an air date landing exactly in August has never been
//! observed and is treated as a broken page rather than guessed at.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Episode ids are 8-digit date strings (`YYYYMMDD`).
pub const EPID_LEN: usize = 8;

/// Year the first season started. Season ids count up from here.
const FIRST_SEASON_YEAR: i32 = 1975;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("malformed identifier: {0:?}")]
    Malformed(String),

    #[error("air date {0} falls in August, on the season boundary")]
    AugustAirDate(NaiveDate),
}

/// The episode id embedded in a title id (its first 8 characters).
pub fn epid_of_tid(tid: &str) -> Result<&str, IdError> {
    if tid.len() < EPID_LEN || !tid.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdError::Malformed(tid.to_string()));
    }
    Ok(&tid[..EPID_LEN])
}

pub fn date_of_epid(epid: &str) -> Result<NaiveDate, IdError> {
    if epid.len() != EPID_LEN {
        return Err(IdError::Malformed(epid.to_string()));
    }
    NaiveDate::parse_from_str(epid, "%Y%m%d").map_err(|_| IdError::Malformed(epid.to_string()))
}

/// Season id for an air date. Seasons start in September or October and run
/// through the following summer, so dates in January through July belong to
/// the season that started the previous year.
pub fn sid_of_date(date: NaiveDate) -> Result<i32, IdError> {
    if date.month() == 8 {
        return Err(IdError::AugustAirDate(date));
    }
    let mut sid = 1 + (date.year() - FIRST_SEASON_YEAR);
    if date.month() <= 7 {
        sid -= 1;
    }
    Ok(sid)
}

pub fn sid_of_epid(epid: &str) -> Result<i32, IdError> {
    sid_of_date(date_of_epid(epid)?)
}

pub fn sid_of_tid(tid: &str) -> Result<i32, IdError> {
    sid_of_epid(epid_of_tid(tid)?)
}

/// Season id for a season's starting year (season pages link seasons by the
/// year they began in).
pub const fn sid_of_year(year: i32) -> i32 {
    1 + (year - FIRST_SEASON_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tid_truncates_to_epid() {
        assert_eq!(epid_of_tid("2002051810").unwrap(), "20020518");
        assert_eq!(epid_of_tid("197510111").unwrap(), "19751011");
    }

    #[test]
    fn lovers_sketch_is_season_27() {
        // Aired 2002-05-18, late in the season that began in fall 2001.
        assert_eq!(sid_of_tid("2002051810").unwrap(), 27);
        assert_eq!(sid_of_epid("20020518").unwrap(), 27);
    }

    #[test]
    fn fall_episodes_belong_to_the_starting_season() {
        assert_eq!(sid_of_epid("19751011").unwrap(), 1);
        assert_eq!(sid_of_epid("20141004").unwrap(), 40);
    }

    #[test]
    fn sid_agrees_through_tid_and_epid() {
        for tid in ["197510111", "2002051810", "2015110711", "201703046"] {
            let epid = epid_of_tid(tid).unwrap();
            assert_eq!(sid_of_epid(epid).unwrap(), sid_of_tid(tid).unwrap());
        }
    }

    #[test]
    fn august_dates_are_rejected() {
        let err = sid_of_epid("19900815").unwrap_err();
        assert!(matches!(err, IdError::AugustAirDate(_)));
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert!(epid_of_tid("2002").is_err());
        assert!(epid_of_tid("2002-05-18").is_err());
        assert!(date_of_epid("20021301").is_err());
        assert!(date_of_epid("200205181").is_err());
    }

    #[test]
    fn season_start_years_map_to_sids() {
        assert_eq!(sid_of_year(1975), 1);
        assert_eq!(sid_of_year(2014), 40);
    }
}
