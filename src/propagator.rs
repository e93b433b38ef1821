//! SGP4/SDP4 orbit propagation.
//!
//! [`Propagator::new`] runs the one-time initialization: it un-Kozais the
//! catalog mean motion, derives the J2/J3/J4 secular rates and the B*-driven
//! drag coefficient chain, classifies the orbit regime, and (for deep-space
//! orbits) derives the lunar/solar and resonance terms. The resulting record
//! is immutable; [`Propagator::propagate`] is a pure function of the record
//! and the elapsed minutes since epoch, so one record can serve any number
//! of threads without locking.
//!
//! # Architecture
//! The regime decision is made once and carried as a tagged `Regime` value
//! inside the record; per-query code dispatches on it instead of
//! re-evaluating the period. All per-query intermediates live on the stack.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::*;
use crate::deepspace::{DeepSpace, DeepSpaceInit};
use crate::elements::Elements;
use crate::epoch;
use crate::gravity::{GravityConstants, GravityModel};

const X2O3: f64 = 2.0 / 3.0;

/// Guard for the 1/(1+cos i) pole in the long-period coefficient.
const TEMP4: f64 = 1.5e-12;

/// Kepler solver iteration budget.
const KEPLER_MAX_ITER: u32 = 10;
const KEPLER_TOL: f64 = 1.0e-12;

/// Eccentricity ceiling accepted at initialization. The drag expansion is
/// not valid arbitrarily close to 1, and catalog sets at the field maximum
/// (e = 0.9999999) must be rejected rather than propagated.
const MAX_ECCENTRICITY: f64 = 0.999999;

/// Deep-space initialization convention.
///
/// `Afspc` reproduces the operational AFSPC code: sidereal time from the
/// 1970-based recursion and extra node wrapping in the low-inclination
/// periodic branch. `Improved` uses the plain Julian-date sidereal time
/// polynomial and no extra wrapping; it matches the published verification
/// ephemerides and is the default. Near-Earth behavior is identical in both
/// modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpsMode {
    Afspc,
    Improved,
}

impl Default for OpsMode {
    fn default() -> Self {
        OpsMode::Improved
    }
}

/// Initialization failures: the element set is self-consistent text but
/// physically unusable. No record is produced.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("eccentricity {0} outside [0, {MAX_ECCENTRICITY}]")]
    InvalidEccentricity(f64),

    #[error("mean motion {0} rad/min is not positive")]
    InvalidMeanMotion(f64),

    #[error("semi-latus rectum {0} Earth radii is negative")]
    InvalidSemiLatusRectum(f64),
}

/// Per-query propagation failures. Local to the query; the record stays
/// valid for other times.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationError {
    #[error("Kepler iteration did not converge within {iterations} iterations")]
    KeplerNotConverged { iterations: u32 },

    #[error("satellite has decayed below the Earth's surface")]
    Decayed,
}

/// Position/velocity in the TEME (true-equator, mean-equinox) frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StateVector {
    /// Position (km): [x, y, z]
    pub r: [f64; 3],
    /// Velocity (km/s): [vx, vy, vz]
    pub v: [f64; 3],
    /// Query time, minutes since element epoch (signed).
    pub minutes_from_epoch: f64,
}

impl StateVector {
    /// Position magnitude (km).
    pub fn r_mag(&self) -> f64 {
        (self.r[0].powi(2) + self.r[1].powi(2) + self.r[2].powi(2)).sqrt()
    }

    /// Velocity magnitude (km/s).
    pub fn v_mag(&self) -> f64 {
        (self.v[0].powi(2) + self.v[1].powi(2) + self.v[2].powi(2)).sqrt()
    }
}

/// Orbit regime, fixed at initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
enum Regime {
    NearEarth,
    DeepSpace(Box<DeepSpace>),
}

/// Immutable propagation record for one satellite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Propagator {
    elements: Elements,
    model: GravityModel,
    gc: GravityConstants,
    ops_mode: OpsMode,

    // ── init-time derived constants ──
    gsto: f64,
    no_unkozai: f64,
    /// Brouwer semi-major axis (Earth radii).
    a: f64,
    /// True when the low-perigee truncated drag expansion applies.
    simple_drag: bool,
    con41: f64,
    cc1: f64,
    cc4: f64,
    cc5: f64,
    d2: f64,
    d3: f64,
    d4: f64,
    delmo: f64,
    eta: f64,
    argpdot: f64,
    omgcof: f64,
    sinmao: f64,
    t2cof: f64,
    t3cof: f64,
    t4cof: f64,
    t5cof: f64,
    x1mth2: f64,
    x7thm1: f64,
    mdot: f64,
    nodedot: f64,
    xlcof: f64,
    aycof: f64,
    xmcof: f64,
    nodecf: f64,
    regime: Regime,
}

impl Propagator {
    /// Initialize a propagation record from normalized elements.
    pub fn new(
        elements: Elements,
        model: GravityModel,
        ops_mode: OpsMode,
    ) -> Result<Self, InitError> {
        let gc = model.constants();

        if elements.mean_motion <= 0.0 {
            return Err(InitError::InvalidMeanMotion(elements.mean_motion));
        }
        let ecco = elements.eccentricity;
        if !(0.0..=MAX_ECCENTRICITY).contains(&ecco) {
            return Err(InitError::InvalidEccentricity(ecco));
        }

        // Recover the Brouwer mean motion from the Kozai value: one fixed
        // correction pass, not an iteration.
        let eccsq = ecco * ecco;
        let omeosq = 1.0 - eccsq;
        let rteosq = omeosq.sqrt();
        let inclo = elements.inclination;
        let cosio = inclo.cos();
        let sinio = inclo.sin();
        let cosio2 = cosio * cosio;

        let ak = (gc.xke / elements.mean_motion).powf(X2O3);
        let d1 = 0.75 * gc.j2 * (3.0 * cosio2 - 1.0) / (rteosq * omeosq);
        let mut del = d1 / (ak * ak);
        let adel = ak * (1.0 - del * del - del * (1.0 / 3.0 + 134.0 * del * del / 81.0));
        del = d1 / (adel * adel);
        let no_unkozai = elements.mean_motion / (1.0 + del);
        if no_unkozai <= 0.0 {
            return Err(InitError::InvalidMeanMotion(no_unkozai));
        }

        let ao = (gc.xke / no_unkozai).powf(X2O3);
        let po = ao * omeosq;
        if po < 0.0 {
            return Err(InitError::InvalidSemiLatusRectum(po));
        }
        let con42 = 1.0 - 5.0 * cosio2;
        let con41 = -con42 - cosio2 - cosio2;
        let posq = po * po;
        let rp = ao * (1.0 - ecco);

        let gsto = match ops_mode {
            OpsMode::Afspc => epoch::gstime_afspc(elements.epoch_days_1950()),
            OpsMode::Improved => epoch::gstime(elements.epoch_jd),
        };

        let a = (no_unkozai * gc.tumin).powf(-X2O3);

        // Drag and secular-rate coefficient chain.
        let ss = 78.0 / gc.radius_earth_km + 1.0;
        let qzms2t = ((120.0 - 78.0) / gc.radius_earth_km).powi(4);

        let mut simple_drag = rp < 220.0 / gc.radius_earth_km + 1.0;
        let mut sfour = ss;
        let mut qzms24 = qzms2t;
        let perige = (rp - 1.0) * gc.radius_earth_km;
        if perige < 156.0 {
            sfour = perige - 78.0;
            if perige < 98.0 {
                sfour = 20.0;
            }
            qzms24 = ((120.0 - sfour) / gc.radius_earth_km).powi(4);
            sfour = sfour / gc.radius_earth_km + 1.0;
        }

        let pinvsq = 1.0 / posq;
        let tsi = 1.0 / (ao - sfour);
        let eta = ao * ecco * tsi;
        let etasq = eta * eta;
        let eeta = ecco * eta;
        let psisq = (1.0 - etasq).abs();
        let coef = qzms24 * tsi.powi(4);
        let coef1 = coef / psisq.powf(3.5);
        let cc2 = coef1
            * no_unkozai
            * (ao * (1.0 + 1.5 * etasq + eeta * (4.0 + etasq))
                + 0.375 * gc.j2 * tsi / psisq * con41 * (8.0 + 3.0 * etasq * (8.0 + etasq)));
        let cc1 = elements.bstar * cc2;
        let mut cc3 = 0.0;
        if ecco > 1.0e-4 {
            cc3 = -2.0 * coef * tsi * gc.j3oj2 * no_unkozai * sinio / ecco;
        }
        let x1mth2 = 1.0 - cosio2;
        let cc4 = 2.0
            * no_unkozai
            * coef1
            * ao
            * omeosq
            * (eta * (2.0 + 0.5 * etasq) + ecco * (0.5 + 2.0 * etasq)
                - gc.j2 * tsi / (ao * psisq)
                    * (-3.0 * con41 * (1.0 - 2.0 * eeta + etasq * (1.5 - 0.5 * eeta))
                        + 0.75
                            * x1mth2
                            * (2.0 * etasq - eeta * (1.0 + etasq))
                            * (2.0 * elements.arg_perigee).cos()));
        let cc5 = 2.0 * coef1 * ao * omeosq * (1.0 + 2.75 * (etasq + eeta) + eeta * etasq);

        let cosio4 = cosio2 * cosio2;
        let temp1 = 1.5 * gc.j2 * pinvsq * no_unkozai;
        let temp2 = 0.5 * temp1 * gc.j2 * pinvsq;
        let temp3 = -0.46875 * gc.j4 * pinvsq * pinvsq * no_unkozai;
        let mdot = no_unkozai
            + 0.5 * temp1 * rteosq * con41
            + 0.0625 * temp2 * rteosq * (13.0 - 78.0 * cosio2 + 137.0 * cosio4);
        let argpdot = -0.5 * temp1 * con42
            + 0.0625 * temp2 * (7.0 - 114.0 * cosio2 + 395.0 * cosio4)
            + temp3 * (3.0 - 36.0 * cosio2 + 49.0 * cosio4);
        let xhdot1 = -temp1 * cosio;
        let nodedot = xhdot1
            + (0.5 * temp2 * (4.0 - 19.0 * cosio2) + 2.0 * temp3 * (3.0 - 7.0 * cosio2)) * cosio;

        let omgcof = elements.bstar * cc3 * elements.arg_perigee.cos();
        let xmcof = if ecco > 1.0e-4 {
            -X2O3 * coef * elements.bstar / eeta
        } else {
            0.0
        };
        let nodecf = 3.5 * omeosq * xhdot1 * cc1;
        let t2cof = 1.5 * cc1;
        let xlcof = if (cosio + 1.0).abs() > TEMP4 {
            -0.25 * gc.j3oj2 * sinio * (3.0 + 5.0 * cosio) / (1.0 + cosio)
        } else {
            -0.25 * gc.j3oj2 * sinio * (3.0 + 5.0 * cosio) / TEMP4
        };
        let aycof = -0.5 * gc.j3oj2 * sinio;
        let delmotemp = 1.0 + eta * elements.mean_anomaly.cos();
        let delmo = delmotemp * delmotemp * delmotemp;
        let sinmao = elements.mean_anomaly.sin();
        let x7thm1 = 7.0 * cosio2 - 1.0;

        let period_min = TAU / no_unkozai;
        let regime = if period_min >= DEEP_SPACE_PERIOD_MIN {
            simple_drag = true;
            let ds = DeepSpace::initialize(&DeepSpaceInit {
                epoch_days_1950: elements.epoch_days_1950(),
                ecco,
                argpo: elements.arg_perigee,
                inclo,
                nodeo: elements.raan,
                mo: elements.mean_anomaly,
                no_unkozai,
                gsto,
                mdot,
                nodedot,
                argpdot,
                xke: gc.xke,
            });
            Regime::DeepSpace(Box::new(ds))
        } else {
            Regime::NearEarth
        };
        debug!(
            norad_id = elements.norad_id,
            period_min,
            deep_space = matches!(regime, Regime::DeepSpace(_)),
            "initialized propagation record"
        );

        let (mut d2, mut d3, mut d4) = (0.0, 0.0, 0.0);
        let (mut t3cof, mut t4cof, mut t5cof) = (0.0, 0.0, 0.0);
        if !simple_drag {
            let cc1sq = cc1 * cc1;
            d2 = 4.0 * ao * tsi * cc1sq;
            let temp = d2 * tsi * cc1 / 3.0;
            d3 = (17.0 * ao + sfour) * temp;
            d4 = 0.5 * temp * ao * tsi * (221.0 * ao + 31.0 * sfour) * cc1;
            t3cof = d2 + 2.0 * cc1sq;
            t4cof = 0.25 * (3.0 * d3 + cc1 * (12.0 * d2 + 10.0 * cc1sq));
            t5cof = 0.2
                * (3.0 * d4 + 12.0 * cc1 * d3 + 6.0 * d2 * d2 + 15.0 * cc1sq * (2.0 * d2 + cc1sq));
        }

        Ok(Propagator {
            elements,
            model,
            gc,
            ops_mode,
            gsto,
            no_unkozai,
            a,
            simple_drag,
            con41,
            cc1,
            cc4,
            cc5,
            d2,
            d3,
            d4,
            delmo,
            eta,
            argpdot,
            omgcof,
            sinmao,
            t2cof,
            t3cof,
            t4cof,
            t5cof,
            x1mth2,
            x7thm1,
            mdot,
            nodedot,
            xlcof,
            aycof,
            xmcof,
            nodecf,
            regime,
        })
    }

    /// Propagate to `tsince` minutes after the element epoch (signed).
    ///
    /// Pure function of the record and the offset: the same call always
    /// returns bit-identical results, and concurrent calls on one record
    /// are safe.
    pub fn propagate(&self, tsince: f64) -> Result<StateVector, PropagationError> {
        let el = &self.elements;
        let t = tsince;
        let vkmpersec = self.gc.radius_earth_km * self.gc.xke / 60.0;

        // ── secular gravity and atmospheric drag ──
        let xmdf = el.mean_anomaly + self.mdot * t;
        let argpdf = el.arg_perigee + self.argpdot * t;
        let nodedf = el.raan + self.nodedot * t;
        let mut argpm = argpdf;
        let mut mm = xmdf;
        let t2 = t * t;
        let mut nodem = nodedf + self.nodecf * t2;
        let mut tempa = 1.0 - self.cc1 * t;
        let mut tempe = el.bstar * self.cc4 * t;
        let mut templ = self.t2cof * t2;

        if !self.simple_drag {
            let delomg = self.omgcof * t;
            let delmtemp = 1.0 + self.eta * xmdf.cos();
            let delm = self.xmcof * (delmtemp * delmtemp * delmtemp - self.delmo);
            let temp = delomg + delm;
            mm = xmdf + temp;
            argpm = argpdf - temp;
            let t3 = t2 * t;
            let t4 = t3 * t;
            tempa -= self.d2 * t2 + self.d3 * t3 + self.d4 * t4;
            tempe += el.bstar * self.cc5 * (mm.sin() - self.sinmao);
            templ += self.t3cof * t3 + t4 * (self.t4cof + t * self.t5cof);
        }

        let mut nm = self.no_unkozai;
        let mut em = el.eccentricity;
        let mut inclm = el.inclination;

        if let Regime::DeepSpace(ds) = &self.regime {
            (em, inclm, argpm, nodem, mm, nm) = ds.secular(
                t,
                self.no_unkozai,
                el.arg_perigee,
                self.argpdot,
                em,
                inclm,
                argpm,
                nodem,
                mm,
                nm,
            );
        }

        if nm <= 0.0 {
            warn!(norad_id = el.norad_id, nm, "mean motion collapsed, reporting decay");
            return Err(PropagationError::Decayed);
        }

        let am = (self.gc.xke / nm).powf(X2O3) * tempa * tempa;
        nm = self.gc.xke / am.powf(1.5);
        em -= tempe;

        if em >= 1.0 || em < -0.001 {
            warn!(norad_id = el.norad_id, em, "drag drove eccentricity out of range");
            return Err(PropagationError::Decayed);
        }
        // Avoid a singularity in the long-period terms.
        if em < 1.0e-6 {
            em = 1.0e-6;
        }

        mm += self.no_unkozai * templ;
        let mut xlm = mm + argpm + nodem;

        // Float % keeps the dividend's sign, which is what the angle
        // bookkeeping below expects.
        nodem %= TAU;
        argpm %= TAU;
        xlm %= TAU;
        mm = (xlm - argpm - nodem) % TAU;

        // ── lunar/solar periodics (deep-space only) ──
        let mut ep = em;
        let mut xincp = inclm;
        let mut argpp = argpm;
        let mut nodep = nodem;
        let mut mp = mm;
        let mut sinip = inclm.sin();
        let mut cosip = inclm.cos();
        let mut aycof = self.aycof;
        let mut xlcof = self.xlcof;
        let mut con41 = self.con41;
        let mut x1mth2 = self.x1mth2;
        let mut x7thm1 = self.x7thm1;

        if let Regime::DeepSpace(ds) = &self.regime {
            (ep, xincp, nodep, argpp, mp) =
                ds.periodics(t, self.ops_mode, ep, xincp, nodep, argpp, mp);
            if xincp < 0.0 {
                xincp = -xincp;
                nodep += PI;
                argpp -= PI;
            }
            if !(0.0..=1.0).contains(&ep) {
                warn!(norad_id = el.norad_id, ep, "periodic terms drove eccentricity out of range");
                return Err(PropagationError::Decayed);
            }

            // The long-period coefficients depend on the perturbed
            // inclination; recompute them for this query.
            sinip = xincp.sin();
            cosip = xincp.cos();
            aycof = -0.5 * self.gc.j3oj2 * sinip;
            xlcof = if (cosip + 1.0).abs() > TEMP4 {
                -0.25 * self.gc.j3oj2 * sinip * (3.0 + 5.0 * cosip) / (1.0 + cosip)
            } else {
                -0.25 * self.gc.j3oj2 * sinip * (3.0 + 5.0 * cosip) / TEMP4
            };
            let cosisq = cosip * cosip;
            con41 = 3.0 * cosisq - 1.0;
            x1mth2 = 1.0 - cosisq;
            x7thm1 = 7.0 * cosisq - 1.0;
        }

        // ── long-period periodics and Kepler's equation ──
        let axnl = ep * argpp.cos();
        let temp = 1.0 / (am * (1.0 - ep * ep));
        let aynl = ep * argpp.sin() + temp * aycof;
        let xl = mp + argpp + nodep + temp * xlcof * axnl;

        let u = (xl - nodep) % TAU;
        let mut eo1 = u;
        let mut tem5 = 9999.9_f64;
        let mut iterations = 0;
        while tem5.abs() >= KEPLER_TOL && iterations < KEPLER_MAX_ITER {
            let sineo1 = eo1.sin();
            let coseo1 = eo1.cos();
            tem5 = 1.0 - coseo1 * axnl - sineo1 * aynl;
            tem5 = (u - aynl * coseo1 + axnl * sineo1 - eo1) / tem5;
            if tem5.abs() >= 0.95 {
                tem5 = if tem5 > 0.0 { 0.95 } else { -0.95 };
            }
            eo1 += tem5;
            iterations += 1;
        }
        if tem5.abs() >= KEPLER_TOL {
            warn!(norad_id = el.norad_id, tsince, "Kepler iteration exhausted its budget");
            return Err(PropagationError::KeplerNotConverged {
                iterations: KEPLER_MAX_ITER,
            });
        }

        // ── short-period periodics ──
        let sineo1 = eo1.sin();
        let coseo1 = eo1.cos();
        let ecose = axnl * coseo1 + aynl * sineo1;
        let esine = axnl * sineo1 - aynl * coseo1;
        let el2 = axnl * axnl + aynl * aynl;
        let pl = am * (1.0 - el2);
        if pl < 0.0 {
            warn!(norad_id = el.norad_id, pl, "negative semi-latus rectum");
            return Err(PropagationError::Decayed);
        }

        let rl = am * (1.0 - ecose);
        let rdotl = am.sqrt() * esine / rl;
        let rvdotl = pl.sqrt() / rl;
        let betal = (1.0 - el2).sqrt();
        let temp = esine / (1.0 + betal);
        let sinu = am / rl * (sineo1 - aynl - axnl * temp);
        let cosu = am / rl * (coseo1 - axnl + aynl * temp);
        let mut su = sinu.atan2(cosu);
        let sin2u = (cosu + cosu) * sinu;
        let cos2u = 1.0 - 2.0 * sinu * sinu;
        let temp = 1.0 / pl;
        let temp1 = 0.5 * self.gc.j2 * temp;
        let temp2 = temp1 * temp;

        let mrt = rl * (1.0 - 1.5 * temp2 * betal * con41) + 0.5 * temp1 * x1mth2 * cos2u;
        su -= 0.25 * temp2 * x7thm1 * sin2u;
        let xnode = nodep + 1.5 * temp2 * cosip * sin2u;
        let xinc = xincp + 1.5 * temp2 * cosip * sinip * cos2u;
        let mvt = rdotl - nm * temp1 * x1mth2 * sin2u / self.gc.xke;
        let rvdot = rvdotl + nm * temp1 * (x1mth2 * cos2u + 1.5 * con41) / self.gc.xke;

        // ── orientation vectors and 3-1-3 rotation to TEME ──
        let sinsu = su.sin();
        let cossu = su.cos();
        let snod = xnode.sin();
        let cnod = xnode.cos();
        let sini = xinc.sin();
        let cosi = xinc.cos();
        let xmx = -snod * cosi;
        let xmy = cnod * cosi;
        let ux = xmx * sinsu + cnod * cossu;
        let uy = xmy * sinsu + snod * cossu;
        let uz = sini * sinsu;
        let vx = xmx * cossu - cnod * sinsu;
        let vy = xmy * cossu - snod * sinsu;
        let vz = sini * cossu;

        if mrt < 1.0 {
            warn!(norad_id = el.norad_id, mrt, tsince, "perigee below surface, reporting decay");
            return Err(PropagationError::Decayed);
        }

        let mr = mrt * self.gc.radius_earth_km;
        Ok(StateVector {
            r: [mr * ux, mr * uy, mr * uz],
            v: [
                (mvt * ux + rvdot * vx) * vkmpersec,
                (mvt * uy + rvdot * vy) * vkmpersec,
                (mvt * uz + rvdot * vz) * vkmpersec,
            ],
            minutes_from_epoch: tsince,
        })
    }

    /// NORAD catalog number of the underlying element set.
    pub fn norad_id(&self) -> u32 {
        self.elements.norad_id
    }

    /// The normalized element set this record was built from.
    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    /// Gravity model the record was initialized with.
    pub fn gravity_model(&self) -> GravityModel {
        self.model
    }

    /// Brouwer mean motion (rad/min) after the Kozai correction.
    pub fn mean_motion_unkozai(&self) -> f64 {
        self.no_unkozai
    }

    /// Brouwer semi-major axis (Earth radii).
    pub fn semi_major_axis(&self) -> f64 {
        self.a
    }

    /// True when the deep-space (SDP4) branch is active.
    pub fn is_deep_space(&self) -> bool {
        matches!(self.regime, Regime::DeepSpace(_))
    }

    #[cfg(test)]
    pub(crate) fn deep_space(&self) -> Option<&DeepSpace> {
        match &self.regime {
            Regime::DeepSpace(ds) => Some(ds),
            Regime::NearEarth => None,
        }
    }
}

/// Propagate many satellites at the same set of time offsets, in parallel.
///
/// One independent task per satellite; per-query failures are reported in
/// place so one decayed satellite does not poison the batch.
pub fn propagate_batch(
    satellites: &[Propagator],
    times_min: &[f64],
) -> Vec<(u32, Vec<Result<StateVector, PropagationError>>)> {
    use rayon::prelude::*;

    satellites
        .par_iter()
        .map(|sat| {
            let states = times_min.iter().map(|&t| sat.propagate(t)).collect();
            (sat.norad_id(), states)
        })
        .collect()
}
