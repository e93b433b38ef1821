//! Two-Line Element (TLE) set parser.
//!
//! Parses standard NORAD/Space-Track TLE format (2-line and 3-line with name).
//! Fields are kept in catalog units here; [`crate::elements::Elements`]
//! performs the conversion to propagator-native units.
//!
//! # TLE Format Reference
//! ```text
//! Line 0 (optional): Satellite Name (up to 24 chars)
//! Line 1: 1 NNNNNC NNNNNAAA NNNNN.NNNNNNNN +.NNNNNNNN +NNNNN-N +NNNNN-N N NNNNN
//! Line 2: 2 NNNNN NNN.NNNN NNN.NNNN NNNNNNN NNN.NNNN NNN.NNNN NN.NNNNNNNNNNNNNN
//! ```
//!
//! # Example
//! ```
//! use satprop::tle::Tle;
//!
//! let line1 = "1 25544U 98067A   24001.50000000  .00016717  00000-0  10270-3 0  9003";
//! let line2 = "2 25544  51.6400 208.5000 0007417  68.0000 292.1000 15.49560000400000";
//!
//! let tle = Tle::parse(line1, line2).unwrap();
//! assert_eq!(tle.norad_id, 25544);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// TLE parsing errors.
#[derive(Error, Debug)]
pub enum TleError {
    #[error("Line 1 must start with '1', got '{0}'")]
    InvalidLine1Start(char),

    #[error("Line 2 must start with '2', got '{0}'")]
    InvalidLine2Start(char),

    #[error("Line {0} contains non-ASCII characters")]
    NonAscii(u8),

    #[error("Line 1 length must be 69 characters, got {0}")]
    InvalidLine1Length(usize),

    #[error("Line 2 length must be 69 characters, got {0}")]
    InvalidLine2Length(usize),

    #[error("NORAD IDs don't match between lines: {0} vs {1}")]
    NoradIdMismatch(u32, u32),

    #[error("Failed to parse field '{field}': {source}")]
    ParseField {
        field: &'static str,
        source: std::num::ParseFloatError,
    },

    #[error("Failed to parse integer field '{field}': {source}")]
    ParseIntField {
        field: &'static str,
        source: std::num::ParseIntError,
    },

    #[error("Failed to parse implied-decimal field '{0}'")]
    ImpliedDecimal(String),

    #[error("No TLEs found in input")]
    Empty,
}

/// A parsed Two-Line Element set, still in catalog units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tle {
    /// Satellite name (from line 0, if present).
    pub name: Option<String>,
    /// NORAD catalog number.
    pub norad_id: u32,
    /// International designator (launch year, launch number, piece).
    pub intl_designator: String,
    /// Classification (U=unclassified, C=classified, S=secret).
    pub classification: char,
    /// Epoch year (full 4-digit year).
    pub epoch_year: u16,
    /// Epoch day of year (fractional).
    pub epoch_day: f64,
    /// First derivative of mean motion (rev/day²) / 2.
    pub mean_motion_dot: f64,
    /// Second derivative of mean motion (rev/day³) / 6.
    pub mean_motion_ddot: f64,
    /// B* drag term (1/Earth radii).
    pub bstar: f64,
    /// Ephemeris type (usually 0).
    pub ephemeris_type: u8,
    /// Element set number.
    pub element_set: u16,
    /// Inclination (degrees).
    pub inclination_deg: f64,
    /// Right ascension of ascending node (degrees).
    pub raan_deg: f64,
    /// Eccentricity (dimensionless).
    pub eccentricity: f64,
    /// Argument of perigee (degrees).
    pub arg_perigee_deg: f64,
    /// Mean anomaly (degrees).
    pub mean_anomaly_deg: f64,
    /// Mean motion (revolutions per day).
    pub mean_motion_rev_day: f64,
    /// Revolution number at epoch.
    pub rev_number: u32,
}

impl Tle {
    /// Parse a TLE from two lines (without satellite name).
    pub fn parse(line1: &str, line2: &str) -> Result<Self, TleError> {
        Self::parse_with_name(None, line1, line2)
    }

    /// Parse a TLE from three lines (with satellite name on line 0).
    pub fn parse_3line(line0: &str, line1: &str, line2: &str) -> Result<Self, TleError> {
        let name = line0.trim().trim_start_matches("0 ").trim().to_string();
        Self::parse_with_name(Some(name), line1, line2)
    }

    /// Parse with optional name.
    fn parse_with_name(name: Option<String>, line1: &str, line2: &str) -> Result<Self, TleError> {
        let line1 = line1.trim_end();
        let line2 = line2.trim_end();

        // The format is pure ASCII and the field offsets below are byte
        // slices; reject multibyte input before slicing can split a char.
        if !line1.is_ascii() {
            return Err(TleError::NonAscii(1));
        }
        if !line2.is_ascii() {
            return Err(TleError::NonAscii(2));
        }

        // Pad short lines to the full 69 columns; trailing fields
        // (ephemeris type, element set, rev number) may be absent.
        let l1: String = format!("{:<69}", line1);
        let l2: String = format!("{:<69}", line2);

        if line1.len() < 61 {
            return Err(TleError::InvalidLine1Length(line1.len()));
        }
        if line2.len() < 63 {
            return Err(TleError::InvalidLine2Length(line2.len()));
        }

        let c1 = l1.as_bytes()[0] as char;
        let c2 = l2.as_bytes()[0] as char;
        if c1 != '1' {
            return Err(TleError::InvalidLine1Start(c1));
        }
        if c2 != '2' {
            return Err(TleError::InvalidLine2Start(c2));
        }

        // ── Line 1 ──
        let norad_id_1 = l1[2..7]
            .trim()
            .parse::<u32>()
            .map_err(|e| TleError::ParseIntField {
                field: "norad_id (line 1)",
                source: e,
            })?;

        let classification = l1.as_bytes()[7] as char;
        let intl_designator = l1[9..17].trim().to_string();

        let epoch_year_2d = l1[18..20]
            .trim()
            .parse::<u16>()
            .map_err(|e| TleError::ParseIntField {
                field: "epoch_year",
                source: e,
            })?;
        // Two-digit year window: 57..99 → 19xx, 00..56 → 20xx
        let epoch_year = if epoch_year_2d >= 57 {
            1900 + epoch_year_2d
        } else {
            2000 + epoch_year_2d
        };

        let epoch_day = l1[20..32]
            .trim()
            .parse::<f64>()
            .map_err(|e| TleError::ParseField {
                field: "epoch_day",
                source: e,
            })?;

        let mean_motion_dot = l1[33..43]
            .trim()
            .parse::<f64>()
            .map_err(|e| TleError::ParseField {
                field: "mean_motion_dot",
                source: e,
            })?;

        let mean_motion_ddot = parse_implied_decimal(&l1[44..52])?;
        let bstar = parse_implied_decimal(&l1[53..61])?;

        let ephemeris_type = l1[62..63].trim().parse::<u8>().unwrap_or(0);
        let element_set = l1[64..68].trim().parse::<u16>().unwrap_or(0);

        // ── Line 2 ──
        let norad_id_2 = l2[2..7]
            .trim()
            .parse::<u32>()
            .map_err(|e| TleError::ParseIntField {
                field: "norad_id (line 2)",
                source: e,
            })?;

        if norad_id_1 != norad_id_2 {
            return Err(TleError::NoradIdMismatch(norad_id_1, norad_id_2));
        }

        let inclination_deg = l2[8..16]
            .trim()
            .parse::<f64>()
            .map_err(|e| TleError::ParseField {
                field: "inclination",
                source: e,
            })?;

        let raan_deg = l2[17..25]
            .trim()
            .parse::<f64>()
            .map_err(|e| TleError::ParseField {
                field: "raan",
                source: e,
            })?;

        // Eccentricity has an implied leading decimal point
        let ecc_str = format!("0.{}", l2[26..33].trim());
        let eccentricity = ecc_str
            .parse::<f64>()
            .map_err(|e| TleError::ParseField {
                field: "eccentricity",
                source: e,
            })?;

        let arg_perigee_deg = l2[34..42]
            .trim()
            .parse::<f64>()
            .map_err(|e| TleError::ParseField {
                field: "arg_perigee",
                source: e,
            })?;

        let mean_anomaly_deg = l2[43..51]
            .trim()
            .parse::<f64>()
            .map_err(|e| TleError::ParseField {
                field: "mean_anomaly",
                source: e,
            })?;

        let mean_motion_rev_day = l2[52..63]
            .trim()
            .parse::<f64>()
            .map_err(|e| TleError::ParseField {
                field: "mean_motion",
                source: e,
            })?;

        let rev_number = l2[63..68].trim().parse::<u32>().unwrap_or(0);

        Ok(Tle {
            name,
            norad_id: norad_id_1,
            intl_designator,
            classification,
            epoch_year,
            epoch_day,
            mean_motion_dot,
            mean_motion_ddot,
            bstar,
            ephemeris_type,
            element_set,
            inclination_deg,
            raan_deg,
            eccentricity,
            arg_perigee_deg,
            mean_anomaly_deg,
            mean_motion_rev_day,
            rev_number,
        })
    }

    /// Parse a string containing multiple TLEs (2-line or 3-line format).
    ///
    /// Handles mixed formats: lines starting with '1' begin a 2-line TLE,
    /// other non-empty lines are treated as satellite names (line 0).
    pub fn parse_batch(input: &str) -> Result<Vec<Self>, TleError> {
        let lines: Vec<&str> = input
            .lines()
            .map(|l| l.trim_end())
            .filter(|l| !l.is_empty())
            .collect();

        if lines.is_empty() {
            return Err(TleError::Empty);
        }

        let mut tles = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            if lines[i].starts_with('1') && i + 1 < lines.len() && lines[i + 1].starts_with('2') {
                tles.push(Tle::parse(lines[i], lines[i + 1])?);
                i += 2;
            } else if i + 2 < lines.len()
                && lines[i + 1].starts_with('1')
                && lines[i + 2].starts_with('2')
            {
                tles.push(Tle::parse_3line(lines[i], lines[i + 1], lines[i + 2])?);
                i += 3;
            } else {
                // Skip unrecognized lines
                i += 1;
            }
        }

        if tles.is_empty() {
            return Err(TleError::Empty);
        }

        Ok(tles)
    }
}

impl std::fmt::Display for Tle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (NORAD {}): {:.4} deg inc, {:.7} ecc, {:.8} rev/day",
            self.name.as_deref().unwrap_or("UNKNOWN"),
            self.norad_id,
            self.inclination_deg,
            self.eccentricity,
            self.mean_motion_rev_day,
        )
    }
}

/// Parse the TLE "implied decimal" format: " NNNNN-N" → float.
///
/// Examples: " 16538-4" → 0.16538e-4, "-11606-4" → -0.11606e-4
fn parse_implied_decimal(s: &str) -> Result<f64, TleError> {
    let s = s.trim();
    if s.is_empty() || s.chars().all(|c| c == '0' || c == ' ' || c == '+' || c == '-') {
        return Ok(0.0);
    }

    // Find the exponent sign (last + or - that isn't the leading sign)
    let bytes = s.as_bytes();
    let mut exp_pos = None;
    for i in (1..bytes.len()).rev() {
        if bytes[i] == b'+' || bytes[i] == b'-' {
            exp_pos = Some(i);
            break;
        }
    }

    match exp_pos {
        Some(pos) => {
            let mantissa_str = &s[..pos];
            let exp_str = &s[pos..];

            // Add the implied leading "0."
            let sign = if mantissa_str.starts_with('-') { "-" } else { "" };
            let digits = mantissa_str.trim_start_matches(['+', '-', ' ']);

            let full = format!("{}0.{}e{}", sign, digits, exp_str);
            full.parse::<f64>()
                .map_err(|_| TleError::ImpliedDecimal(s.to_string()))
        }
        None => {
            let sign = if s.starts_with('-') { "-" } else { "" };
            let digits = s.trim_start_matches(['+', '-', ' ']);
            let full = format!("{}0.{}", sign, digits);
            full.parse::<f64>()
                .map_err(|_| TleError::ImpliedDecimal(s.to_string()))
        }
    }
}

/// Compute the TLE checksum of a line (mod-10 sum of digits, '-' counts as 1).
///
/// Distributed catalog lines carry this in column 69. It is informational
/// only; historical and test-fixture TLEs often omit or violate it, so the
/// parser does not enforce it.
pub fn compute_checksum(line: &str) -> u8 {
    let sum: u32 = line
        .bytes()
        .take(68)
        .map(|b| match b {
            b'0'..=b'9' => (b - b'0') as u32,
            b'-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}
