//! Intensity measure type names.
//!
//! Output documents use the legacy names (`pga`, `pgv`, `psa03`, ...), while
//! input tables may use either those or the `SA(0.3)` style. Spectral names
//! are matched on their period, compared as floating point.

use crate::error::{ImpactError, Result};

/// Canonical measurement kinds, in output order
pub const OUTPUT_IMTS: [&str; 5] = ["pga", "pgv", "psa03", "psa10", "psa30"];

const PERIOD_TOLERANCE: f64 = 1e-6;

/// Period in seconds of a spectral acceleration name.
///
/// `PSA03` reads as 0.3 (digits are tenths of a second), `SA(1.0)` as 1.0.
pub fn spectral_period(name: &str) -> Option<f64> {
    let upper = name.trim().to_ascii_uppercase();
    if let Some(digits) = upper.strip_prefix("PSA") {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        return digits.parse::<u32>().ok().map(|d| f64::from(d) / 10.0);
    }
    let inner = upper.strip_prefix("SA")?;
    inner
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim()
        .parse::<f64>()
        .ok()
}

/// True for PGA, PGV and any spectral acceleration column
pub fn is_pgm_column(name: &str) -> bool {
    name.eq_ignore_ascii_case("PGA") || name.eq_ignore_ascii_case("PGV") || spectral_period(name).is_some()
}

/// Find the column in `columns` that holds the measurement `imt`.
///
/// Fails with [`ImpactError::UnresolvableMeasurementName`] when nothing
/// matches; callers treat that as "no such measurement".
pub fn translate_imt<'a>(imt: &str, columns: &[&'a str]) -> Result<&'a str> {
    let found = if imt.eq_ignore_ascii_case("PGA") || imt.eq_ignore_ascii_case("PGV") {
        columns.iter().find(|c| c.eq_ignore_ascii_case(imt))
    } else {
        spectral_period(imt).and_then(|period| {
            columns.iter().find(|c| {
                spectral_period(c).is_some_and(|p| (p - period).abs() < PERIOD_TOLERANCE)
            })
        })
    };

    found.copied().ok_or_else(|| ImpactError::UnresolvableMeasurementName {
        imt: imt.to_string(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
    })
}

/// Legacy output name for any accepted measurement name.
///
/// `SA(0.3)` becomes `psa03`; names that are not measurements are lowercased.
pub fn legacy_name(name: &str) -> String {
    if name.eq_ignore_ascii_case("PGA") || name.eq_ignore_ascii_case("PGV") {
        return name.to_ascii_lowercase();
    }
    match spectral_period(name) {
        Some(period) => format!("psa{:02}", (period * 10.0).round() as u32),
        None => name.trim().to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectral_period() {
        assert_eq!(spectral_period("psa03"), Some(0.3));
        assert_eq!(spectral_period("PSA10"), Some(1.0));
        assert_eq!(spectral_period("SA(3.0)"), Some(3.0));
        assert_eq!(spectral_period("sa(0.30)"), Some(0.3));
        assert_eq!(spectral_period("PGA"), None);
        assert_eq!(spectral_period("PSA"), None);
        assert_eq!(spectral_period("SA(x)"), None);
    }

    #[test]
    fn test_translate_new_style_columns() {
        let columns = ["PGA", "PGV", "SA(0.3)", "SA(1.0)", "SA(3.0)"];
        assert_eq!(translate_imt("pga", &columns).unwrap(), "PGA");
        assert_eq!(translate_imt("psa03", &columns).unwrap(), "SA(0.3)");
        assert_eq!(translate_imt("psa30", &columns).unwrap(), "SA(3.0)");
    }

    #[test]
    fn test_translate_legacy_columns() {
        let columns = ["PGA", "PSA03", "PSA10"];
        assert_eq!(translate_imt("psa10", &columns).unwrap(), "PSA10");
        assert!(matches!(
            translate_imt("pgv", &columns),
            Err(ImpactError::UnresolvableMeasurementName { .. })
        ));
        assert!(translate_imt("psa30", &columns).is_err());
    }

    #[test]
    fn test_legacy_name() {
        assert_eq!(legacy_name("PGA"), "pga");
        assert_eq!(legacy_name("SA(0.3)"), "psa03");
        assert_eq!(legacy_name("SA(3.0)"), "psa30");
        assert_eq!(legacy_name("psa10"), "psa10");
        assert_eq!(legacy_name("MMI"), "mmi");
    }

    #[test]
    fn test_is_pgm_column() {
        assert!(is_pgm_column("pgv"));
        assert!(is_pgm_column("SA(1.0)"));
        assert!(!is_pgm_column("NAME"));
    }
}
