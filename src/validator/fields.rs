//! Keyword rules: prohibited keywords, casing collisions and compulsory
//! keywords.
//!
//! The keyword sets are process-wide constants, fixed at compile time and
//! never mutated. Matching against them is case-insensitive where the rule
//! demands it.

use super::ComplianceError;

/// Keyword carrying the measurement vector.
pub(crate) const DATA: &str = "data";
/// Keyword carrying the channel identifier.
pub(crate) const NAME: &str = "name";
/// Keyword carrying the engineering unit of the samples.
pub(crate) const UNIT_STR: &str = "unit_str";
/// Keyword carrying an explicit time vector.
pub(crate) const TIME: &str = "time";
/// Keyword carrying the sampling frequency, the alternative to `time`.
pub(crate) const FS: &str = "fs";

/// Keywords every channel record must carry. The order defines which missing
/// keyword is reported first.
pub const COMPULSORY_FIELDS: [&str; 3] = [DATA, NAME, UNIT_STR];

/// Keywords that must never appear in a channel record, regardless of casing.
pub const PROHIBITED_FIELDS: [&str; 1] = ["timestamp"];

/// Check that none of the record's keywords are prohibited.
///
/// Two passes over the keyword list:
///
/// 1. **Casing collisions** - a keyword whose lowercase form equals a
///    compulsory keyword without being its exact spelling (e.g. `Unit_Str`)
///    is rejected with a pointer to the canonical spelling. Checked first so
///    a typo surfaces as a collision instead of a confusing missing-keyword
///    error further down.
/// 2. **Prohibited keywords** - any keyword matching the prohibited list
///    case-insensitively is rejected.
pub fn check_prohibited_fields<S: AsRef<str>>(keywords: &[S]) -> Result<(), ComplianceError> {
    for keyword in keywords {
        let keyword = keyword.as_ref();
        if COMPULSORY_FIELDS.contains(&keyword) {
            continue;
        }
        for canonical in COMPULSORY_FIELDS {
            if keyword.eq_ignore_ascii_case(canonical) {
                return Err(ComplianceError::InvalidKeyword {
                    key: keyword.to_string(),
                    canonical,
                });
            }
        }
    }

    for keyword in keywords {
        let keyword = keyword.as_ref();
        if PROHIBITED_FIELDS
            .iter()
            .any(|prohibited| keyword.eq_ignore_ascii_case(prohibited))
        {
            return Err(ComplianceError::ProhibitedKeyword {
                key: keyword.to_string(),
            });
        }
    }

    Ok(())
}

/// Check that all compulsory keywords are present.
///
/// Compulsory keywords are matched case-sensitively in declared order, so the
/// first missing one is reported. A record also needs the information to
/// replicate its time axis: either an explicit `time` vector or a sampling
/// frequency `fs`.
pub fn check_compulsory_fields<S: AsRef<str>>(keywords: &[S]) -> Result<(), ComplianceError> {
    let contains = |name: &str| keywords.iter().any(|keyword| keyword.as_ref() == name);

    for keyword in COMPULSORY_FIELDS {
        if !contains(keyword) {
            return Err(ComplianceError::MissingKeyword { keyword });
        }
    }

    if !contains(TIME) && !contains(FS) {
        return Err(ComplianceError::MissingTimeInformation);
    }

    Ok(())
}
