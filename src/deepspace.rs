//! Deep-space (SDP4) perturbation support.
//!
//! Orbits with periods of 225 minutes or more pick up significant lunar and
//! solar perturbations, and near 12-hour or 24-hour periods they resonate
//! with Earth's longitude-dependent gravity harmonics. This module derives
//! the perturbation coefficients once at initialization and applies the
//! secular and periodic corrections per query.
//!
//! All per-call working values live on the stack. In particular the
//! resonance phase is re-integrated from epoch on every call with a fixed
//! 720-minute step, which reproduces the classical formulation's cached
//! integrator state exactly while keeping the record read-only.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::TAU;
use crate::propagator::OpsMode;

// Lunar/solar mean motion (rad/min) and eccentricity of the perturbing orbits.
const ZNS: f64 = 1.19459e-5;
const ZES: f64 = 0.01675;
const ZNL: f64 = 1.5835218e-4;
const ZEL: f64 = 0.05490;

/// Earth rotation rate (rad/min) used by the resonance theory.
const RPTIM: f64 = 4.37526908801129966e-3;

/// Resonance phase integrator step (minutes).
const STEP: f64 = 720.0;
const STEP2: f64 = 259200.0; // STEP² / 2

/// Resonance classification and the coefficient set that drives the
/// resonance phase integration. Decided once at initialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) enum Resonance {
    /// No commensurability with Earth rotation.
    None,
    /// Geosynchronous-class 24-hour resonance.
    Synchronous {
        del1: f64,
        del2: f64,
        del3: f64,
        xlamo: f64,
        xfact: f64,
    },
    /// Molniya-class 12-hour resonance (requires e ≥ 0.5).
    HalfDay {
        d2201: f64,
        d2211: f64,
        d3210: f64,
        d3222: f64,
        d4410: f64,
        d4422: f64,
        d5220: f64,
        d5232: f64,
        d5421: f64,
        d5433: f64,
        xlamo: f64,
        xfact: f64,
    },
}

/// Init-time deep-space constants: lunar/solar periodic coefficients,
/// secular rates, and the resonance term set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct DeepSpace {
    // Lunar/solar long-period periodic coefficients (solar s*, lunar x*/e*).
    e3: f64,
    ee2: f64,
    se2: f64,
    se3: f64,
    sgh2: f64,
    sgh3: f64,
    sgh4: f64,
    sh2: f64,
    sh3: f64,
    si2: f64,
    si3: f64,
    sl2: f64,
    sl3: f64,
    sl4: f64,
    xgh2: f64,
    xgh3: f64,
    xgh4: f64,
    xh2: f64,
    xh3: f64,
    xi2: f64,
    xi3: f64,
    xl2: f64,
    xl3: f64,
    xl4: f64,
    /// Lunar mean anomaly at epoch (rad).
    zmol: f64,
    /// Solar mean anomaly at epoch (rad).
    zmos: f64,
    // Lunar/solar secular rates (rad/min).
    dedt: f64,
    didt: f64,
    dmdt: f64,
    dnodt: f64,
    domdt: f64,
    /// GMST at epoch (rad).
    gsto: f64,
    resonance: Resonance,
}

/// Epoch-element inputs the initializer hands over.
pub(crate) struct DeepSpaceInit {
    /// Epoch, days since 1950 Jan 0.0 UT.
    pub epoch_days_1950: f64,
    pub ecco: f64,
    pub argpo: f64,
    pub inclo: f64,
    pub nodeo: f64,
    pub mo: f64,
    /// Brouwer mean motion (rad/min).
    pub no_unkozai: f64,
    pub gsto: f64,
    pub mdot: f64,
    pub nodedot: f64,
    pub argpdot: f64,
    pub xke: f64,
}

impl DeepSpace {
    /// Derive all deep-space constants for one satellite.
    ///
    /// Combines the classical dscom (lunar/solar geometry common terms) and
    /// dsinit (secular rates + resonance coefficients) stages; the
    /// intermediate geometry terms never outlive this call.
    pub(crate) fn initialize(init: &DeepSpaceInit) -> Self {
        const C1SS: f64 = 2.9864797e-6;
        const C1L: f64 = 4.7968065e-7;
        const ZSINIS: f64 = 0.39785416;
        const ZCOSIS: f64 = 0.91744867;
        const ZCOSGS: f64 = 0.1945905;
        const ZSINGS: f64 = -0.98088458;

        let nm = init.no_unkozai;
        let em = init.ecco;
        let snodm = init.nodeo.sin();
        let cnodm = init.nodeo.cos();
        let sinomm = init.argpo.sin();
        let cosomm = init.argpo.cos();
        let sinim = init.inclo.sin();
        let cosim = init.inclo.cos();
        let emsq = em * em;
        let betasq = 1.0 - emsq;
        let rtemsq = betasq.sqrt();

        // Lunar orbit geometry at epoch.
        let day = init.epoch_days_1950 + 18261.5;
        let xnodce = (4.5236020 - 9.2422029e-4 * day) % TAU;
        let stem = xnodce.sin();
        let ctem = xnodce.cos();
        let zcosil = 0.91375164 - 0.03568096 * ctem;
        let zsinil = (1.0 - zcosil * zcosil).sqrt();
        let zsinhl = 0.089683511 * stem / zsinil;
        let zcoshl = (1.0 - zsinhl * zsinhl).sqrt();
        let gam = 5.8351514 + 0.0019443680 * day;
        let mut zx = 0.39785416 * stem / zsinil;
        let zy = zcoshl * ctem + 0.91744867 * zsinhl * stem;
        zx = zx.atan2(zy);
        zx = gam + zx - xnodce;
        let zcosgl = zx.cos();
        let zsingl = zx.sin();

        let xnoi = 1.0 / nm;

        // Geometry terms for one perturbing body, given its orbit
        // orientation relative to the satellite. Returns
        // ([z1 z2 z3 z11 z12 z13 z21 z22 z23 z31 z32 z33], [s1..s7]).
        let body_terms = |zcosg: f64,
                          zsing: f64,
                          zcosi: f64,
                          zsini: f64,
                          zcosh: f64,
                          zsinh: f64,
                          cc: f64|
         -> ([f64; 12], [f64; 7]) {
            let a1 = zcosg * zcosh + zsing * zcosi * zsinh;
            let a3 = -zsing * zcosh + zcosg * zcosi * zsinh;
            let a7 = -zcosg * zsinh + zsing * zcosi * zcosh;
            let a8 = zsing * zsini;
            let a9 = zsing * zsinh + zcosg * zcosi * zcosh;
            let a10 = zcosg * zsini;
            let a2 = cosim * a7 + sinim * a8;
            let a4 = cosim * a9 + sinim * a10;
            let a5 = -sinim * a7 + cosim * a8;
            let a6 = -sinim * a9 + cosim * a10;

            let x1 = a1 * cosomm + a2 * sinomm;
            let x2 = a3 * cosomm + a4 * sinomm;
            let x3 = -a1 * sinomm + a2 * cosomm;
            let x4 = -a3 * sinomm + a4 * cosomm;
            let x5 = a5 * sinomm;
            let x6 = a6 * sinomm;
            let x7 = a5 * cosomm;
            let x8 = a6 * cosomm;

            let z31 = 12.0 * x1 * x1 - 3.0 * x3 * x3;
            let z32 = 24.0 * x1 * x2 - 6.0 * x3 * x4;
            let z33 = 12.0 * x2 * x2 - 3.0 * x4 * x4;
            let mut z1 = 3.0 * (a1 * a1 + a2 * a2) + z31 * emsq;
            let mut z2 = 6.0 * (a1 * a3 + a2 * a4) + z32 * emsq;
            let mut z3 = 3.0 * (a3 * a3 + a4 * a4) + z33 * emsq;
            let z11 = -6.0 * a1 * a5 + emsq * (-24.0 * x1 * x7 - 6.0 * x3 * x5);
            let z12 = -6.0 * (a1 * a6 + a3 * a5)
                + emsq * (-24.0 * (x2 * x7 + x1 * x8) - 6.0 * (x3 * x6 + x4 * x5));
            let z13 = -6.0 * a3 * a6 + emsq * (-24.0 * x2 * x8 - 6.0 * x4 * x6);
            let z21 = 6.0 * a2 * a5 + emsq * (24.0 * x1 * x5 - 6.0 * x3 * x7);
            let z22 = 6.0 * (a4 * a5 + a2 * a6)
                + emsq * (24.0 * (x2 * x5 + x1 * x6) - 6.0 * (x4 * x7 + x3 * x8));
            let z23 = 6.0 * a4 * a6 + emsq * (24.0 * x2 * x6 - 6.0 * x4 * x8);
            z1 = z1 + z1 + betasq * z31;
            z2 = z2 + z2 + betasq * z32;
            z3 = z3 + z3 + betasq * z33;
            let s3 = cc * xnoi;
            let s2 = -0.5 * s3 / rtemsq;
            let s4 = s3 * rtemsq;
            let s1 = -15.0 * em * s4;
            let s5 = x1 * x3 + x2 * x4;
            let s6 = x2 * x3 + x1 * x4;
            let s7 = x2 * x4 - x1 * x3;

            (
                [z1, z2, z3, z11, z12, z13, z21, z22, z23, z31, z32, z33],
                [s1, s2, s3, s4, s5, s6, s7],
            )
        };

        // Sun, then Moon.
        let (sz, ss) = body_terms(ZCOSGS, ZSINGS, ZCOSIS, ZSINIS, cnodm, snodm, C1SS);
        let (z, s) = body_terms(
            zcosgl,
            zsingl,
            zcosil,
            zsinil,
            zcoshl * cnodm + zsinhl * snodm,
            snodm * zcoshl - cnodm * zsinhl,
            C1L,
        );

        let zmol = (4.7199672 + 0.22997150 * day - gam) % TAU;
        let zmos = (6.2565837 + 0.017201977 * day) % TAU;

        let [z1, z2, z3, z11, z12, z13, z21, z22, z23, z31, z32, z33] = z;
        let [sz1, sz2, sz3, sz11, sz12, sz13, sz21, sz22, sz23, sz31, sz32, sz33] = sz;
        let [s1, s2, s3, s4, s5, s6, s7] = s;
        let [ss1, ss2, ss3, ss4, ss5, ss6, ss7] = ss;

        // Solar long-period coefficients.
        let se2 = 2.0 * ss1 * ss6;
        let se3 = 2.0 * ss1 * ss7;
        let si2 = 2.0 * ss2 * sz12;
        let si3 = 2.0 * ss2 * (sz13 - sz11);
        let sl2 = -2.0 * ss3 * sz2;
        let sl3 = -2.0 * ss3 * (sz3 - sz1);
        let sl4 = -2.0 * ss3 * (-21.0 - 9.0 * emsq) * ZES;
        let sgh2 = 2.0 * ss4 * sz32;
        let sgh3 = 2.0 * ss4 * (sz33 - sz31);
        let sgh4 = -18.0 * ss4 * ZES;
        let sh2 = -2.0 * ss2 * sz22;
        let sh3 = -2.0 * ss2 * (sz23 - sz21);

        // Lunar long-period coefficients.
        let ee2 = 2.0 * s1 * s6;
        let e3 = 2.0 * s1 * s7;
        let xi2 = 2.0 * s2 * z12;
        let xi3 = 2.0 * s2 * (z13 - z11);
        let xl2 = -2.0 * s3 * z2;
        let xl3 = -2.0 * s3 * (z3 - z1);
        let xl4 = -2.0 * s3 * (-21.0 - 9.0 * emsq) * ZEL;
        let xgh2 = 2.0 * s4 * z32;
        let xgh3 = 2.0 * s4 * (z33 - z31);
        let xgh4 = -18.0 * s4 * ZEL;
        let xh2 = -2.0 * s2 * z22;
        let xh3 = -2.0 * s2 * (z23 - z21);

        // Secular rates from the same geometry.
        let inclm = init.inclo;
        let ses = ss1 * ZNS * ss5;
        let sis = ss2 * ZNS * (sz11 + sz13);
        let sls = -ZNS * ss3 * (sz1 + sz3 - 14.0 - 6.0 * emsq);
        let sghs = ss4 * ZNS * (sz31 + sz33 - 6.0);
        let mut shs = -ZNS * ss2 * (sz21 + sz23);
        if inclm < 5.2359877e-2 || inclm > PI - 5.2359877e-2 {
            shs = 0.0;
        }
        if sinim != 0.0 {
            shs /= sinim;
        }
        let sgs = sghs - cosim * shs;

        let dedt = ses + s1 * ZNL * s5;
        let didt = sis + s2 * ZNL * (z11 + z13);
        let dmdt = sls - ZNL * s3 * (z1 + z3 - 14.0 - 6.0 * emsq);
        let sghl = s4 * ZNL * (z31 + z33 - 6.0);
        let mut shll = -ZNL * s2 * (z21 + z23);
        if inclm < 5.2359877e-2 || inclm > PI - 5.2359877e-2 {
            shll = 0.0;
        }
        let mut domdt = sgs + sghl;
        let mut dnodt = shs;
        if sinim != 0.0 {
            domdt -= cosim / sinim * shll;
            dnodt += shll / sinim;
        }

        let resonance = classify_resonance(init, cosim, sinim, emsq, dmdt, dnodt, domdt);

        DeepSpace {
            e3,
            ee2,
            se2,
            se3,
            sgh2,
            sgh3,
            sgh4,
            sh2,
            sh3,
            si2,
            si3,
            sl2,
            sl3,
            sl4,
            xgh2,
            xgh3,
            xgh4,
            xh2,
            xh3,
            xi2,
            xi3,
            xl2,
            xl3,
            xl4,
            zmol,
            zmos,
            dedt,
            didt,
            dmdt,
            dnodt,
            domdt,
            gsto: init.gsto,
            resonance,
        }
    }

    /// Lunar/solar secular update plus resonance phase integration.
    ///
    /// Takes the drag-stage mean elements at time `t` (minutes from epoch)
    /// and returns them with the deep-space secular contributions applied:
    /// (em, inclm, argpm, nodem, mm, nm).
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn secular(
        &self,
        t: f64,
        no_unkozai: f64,
        argpo: f64,
        argpdot: f64,
        mut em: f64,
        mut inclm: f64,
        mut argpm: f64,
        mut nodem: f64,
        mut mm: f64,
        mut nm: f64,
    ) -> (f64, f64, f64, f64, f64, f64) {
        const FASX2: f64 = 0.13130908;
        const FASX4: f64 = 2.8843198;
        const FASX6: f64 = 0.37448087;
        const G22: f64 = 5.7686396;
        const G32: f64 = 0.95240898;
        const G44: f64 = 1.8014998;
        const G52: f64 = 1.0508330;
        const G54: f64 = 4.4108898;

        let theta = (self.gsto + t * RPTIM) % TAU;
        em += self.dedt * t;
        inclm += self.didt * t;
        argpm += self.domdt * t;
        nodem += self.dnodt * t;
        mm += self.dmdt * t;

        if matches!(self.resonance, Resonance::None) {
            return (em, inclm, argpm, nodem, mm, nm);
        }

        // Integrate the resonance phase from epoch with fixed 720-minute
        // steps. State is local; the walk is deterministic in t.
        let no = no_unkozai;
        let (xlamo, xfact) = match &self.resonance {
            Resonance::Synchronous { xlamo, xfact, .. } => (*xlamo, *xfact),
            Resonance::HalfDay { xlamo, xfact, .. } => (*xlamo, *xfact),
            Resonance::None => unreachable!(),
        };

        // Mean longitude rate and its first two derivatives at the current
        // integrator state (xli, xni, atime).
        let derivs = |xli: f64, xni: f64, atime: f64| -> (f64, f64, f64) {
            match &self.resonance {
                Resonance::Synchronous { del1, del2, del3, .. } => {
                    let xndt = del1 * (xli - FASX2).sin()
                        + del2 * (2.0 * (xli - FASX4)).sin()
                        + del3 * (3.0 * (xli - FASX6)).sin();
                    let xldot = xni + xfact;
                    let xnddt = (del1 * (xli - FASX2).cos()
                        + 2.0 * del2 * (2.0 * (xli - FASX4)).cos()
                        + 3.0 * del3 * (3.0 * (xli - FASX6)).cos())
                        * xldot;
                    (xndt, xldot, xnddt)
                }
                Resonance::HalfDay {
                    d2201,
                    d2211,
                    d3210,
                    d3222,
                    d4410,
                    d4422,
                    d5220,
                    d5232,
                    d5421,
                    d5433,
                    ..
                } => {
                    let xomi = argpo + argpdot * atime;
                    let x2omi = xomi + xomi;
                    let x2li = xli + xli;
                    let xndt = d2201 * (x2omi + xli - G22).sin()
                        + d2211 * (xli - G22).sin()
                        + d3210 * (xomi + xli - G32).sin()
                        + d3222 * (-xomi + xli - G32).sin()
                        + d4410 * (x2omi + x2li - G44).sin()
                        + d4422 * (x2li - G44).sin()
                        + d5220 * (xomi + xli - G52).sin()
                        + d5232 * (-xomi + xli - G52).sin()
                        + d5421 * (xomi + x2li - G54).sin()
                        + d5433 * (-xomi + x2li - G54).sin();
                    let xldot = xni + xfact;
                    let xnddt = (d2201 * (x2omi + xli - G22).cos()
                        + d2211 * (xli - G22).cos()
                        + d3210 * (xomi + xli - G32).cos()
                        + d3222 * (-xomi + xli - G32).cos()
                        + d5220 * (xomi + xli - G52).cos()
                        + d5232 * (-xomi + xli - G52).cos()
                        + 2.0
                            * (d4410 * (x2omi + x2li - G44).cos()
                                + d4422 * (x2li - G44).cos()
                                + d5421 * (xomi + x2li - G54).cos()
                                + d5433 * (-xomi + x2li - G54).cos()))
                        * xldot;
                    (xndt, xldot, xnddt)
                }
                Resonance::None => unreachable!(),
            }
        };

        let mut atime = 0.0;
        let mut xli = xlamo;
        let mut xni = no;
        let delt = if t > 0.0 { STEP } else { -STEP };

        let (xndt, xldot, xnddt, ft) = loop {
            let (xndt, xldot, xnddt) = derivs(xli, xni, atime);
            if (t - atime).abs() < STEP {
                break (xndt, xldot, xnddt, t - atime);
            }
            xli += xldot * delt + xndt * STEP2;
            xni += xndt * delt + xnddt * STEP2;
            atime += delt;
        };

        nm = xni + xndt * ft + xnddt * ft * ft * 0.5;
        let xl = xli + xldot * ft + xndt * ft * ft * 0.5;
        mm = match self.resonance {
            Resonance::Synchronous { .. } => xl - nodem - argpm + theta,
            _ => xl - 2.0 * nodem + 2.0 * theta,
        };

        (em, inclm, argpm, nodem, mm, nm)
    }

    /// Lunar/solar long-period periodic corrections at time `t`.
    ///
    /// Returns (ep, inclp, nodep, argpp, mp). Inclinations below 0.2 rad
    /// take the Lyddane branch, which folds the corrections through the
    /// node to stay nonsingular.
    pub(crate) fn periodics(
        &self,
        t: f64,
        ops_mode: OpsMode,
        mut ep: f64,
        mut inclp: f64,
        mut nodep: f64,
        mut argpp: f64,
        mut mp: f64,
    ) -> (f64, f64, f64, f64, f64) {
        // Solar terms.
        let mut zm = self.zmos + ZNS * t;
        let mut zf = zm + 2.0 * ZES * zm.sin();
        let mut sinzf = zf.sin();
        let mut f2 = 0.5 * sinzf * sinzf - 0.25;
        let mut f3 = -0.5 * sinzf * zf.cos();
        let ses = self.se2 * f2 + self.se3 * f3;
        let sis = self.si2 * f2 + self.si3 * f3;
        let sls = self.sl2 * f2 + self.sl3 * f3 + self.sl4 * sinzf;
        let sghs = self.sgh2 * f2 + self.sgh3 * f3 + self.sgh4 * sinzf;
        let shs = self.sh2 * f2 + self.sh3 * f3;

        // Lunar terms.
        zm = self.zmol + ZNL * t;
        zf = zm + 2.0 * ZEL * zm.sin();
        sinzf = zf.sin();
        f2 = 0.5 * sinzf * sinzf - 0.25;
        f3 = -0.5 * sinzf * zf.cos();
        let sel = self.ee2 * f2 + self.e3 * f3;
        let sil = self.xi2 * f2 + self.xi3 * f3;
        let sll = self.xl2 * f2 + self.xl3 * f3 + self.xl4 * sinzf;
        let sghl = self.xgh2 * f2 + self.xgh3 * f3 + self.xgh4 * sinzf;
        let shll = self.xh2 * f2 + self.xh3 * f3;

        let pe = ses + sel;
        let pinc = sis + sil;
        let pl = sls + sll;
        let pgh = sghs + sghl;
        let ph = shs + shll;

        inclp += pinc;
        ep += pe;
        let sinip = inclp.sin();
        let cosip = inclp.cos();

        if inclp >= 0.2 {
            let ph_adj = ph / sinip;
            argpp += pgh - cosip * ph_adj;
            nodep += ph_adj;
            mp += pl;
        } else {
            // Lyddane low-inclination branch.
            let sinop = nodep.sin();
            let cosop = nodep.cos();
            let mut alfdp = sinip * sinop;
            let mut betdp = sinip * cosop;
            alfdp += ph * cosop + pinc * cosip * sinop;
            betdp += -ph * sinop + pinc * cosip * cosop;

            nodep %= TAU;
            if nodep < 0.0 && ops_mode == OpsMode::Afspc {
                nodep += TAU;
            }

            let xls = mp + argpp + pl + pgh + (cosip - pinc * sinip) * nodep;
            let xnoh = nodep;
            nodep = alfdp.atan2(betdp);
            if nodep < 0.0 && ops_mode == OpsMode::Afspc {
                nodep += TAU;
            }
            if (xnoh - nodep).abs() > PI {
                if nodep < xnoh {
                    nodep += TAU;
                } else {
                    nodep -= TAU;
                }
            }
            mp += pl;
            argpp = xls - mp - cosip * nodep;
        }

        (ep, inclp, nodep, argpp, mp)
    }

    #[cfg(test)]
    pub(crate) fn is_resonant(&self) -> bool {
        !matches!(self.resonance, Resonance::None)
    }

    #[cfg(test)]
    pub(crate) fn is_synchronous(&self) -> bool {
        matches!(self.resonance, Resonance::Synchronous { .. })
    }

    #[cfg(test)]
    pub(crate) fn is_half_day(&self) -> bool {
        matches!(self.resonance, Resonance::HalfDay { .. })
    }
}

/// Detect Earth-rotation resonance and derive its coefficient set.
fn classify_resonance(
    init: &DeepSpaceInit,
    cosim: f64,
    sinim: f64,
    emsq: f64,
    dmdt: f64,
    dnodt: f64,
    domdt: f64,
) -> Resonance {
    const Q22: f64 = 1.7891679e-6;
    const Q31: f64 = 2.1460748e-6;
    const Q33: f64 = 2.2123015e-7;
    const ROOT22: f64 = 1.7891679e-6;
    const ROOT32: f64 = 3.7393792e-7;
    const ROOT44: f64 = 7.3636953e-9;
    const ROOT52: f64 = 1.1428639e-7;
    const ROOT54: f64 = 2.1765803e-9;

    let nm = init.no_unkozai;
    let em = init.ecco;
    let theta = init.gsto % TAU;
    let x2o3 = 2.0 / 3.0;

    let synchronous = nm > 0.0034906585 && nm < 0.0052359877;
    let half_day = (8.26e-3..=9.24e-3).contains(&nm) && em >= 0.5;

    if !synchronous && !half_day {
        return Resonance::None;
    }

    let aonv = (nm / init.xke).powf(x2o3);

    if half_day {
        debug!(mean_motion = nm, "12-hour resonance terms active");
        let cosisq = cosim * cosim;
        let eccsq = emsq;
        let eoc = em * eccsq;

        let g201 = -0.306 - (em - 0.64) * 0.440;
        let (g211, g310, g322, g410, g422, g520);
        if em <= 0.65 {
            g211 = 3.616 - 13.2470 * em + 16.2900 * eccsq;
            g310 = -19.302 + 117.3900 * em - 228.4190 * eccsq + 156.5910 * eoc;
            g322 = -18.9068 + 109.7927 * em - 214.6334 * eccsq + 146.5816 * eoc;
            g410 = -41.122 + 242.6940 * em - 471.0940 * eccsq + 313.9530 * eoc;
            g422 = -146.407 + 841.8800 * em - 1629.014 * eccsq + 1083.4350 * eoc;
            g520 = -532.114 + 3017.977 * em - 5740.032 * eccsq + 3708.2760 * eoc;
        } else {
            g211 = -72.099 + 331.819 * em - 508.738 * eccsq + 266.724 * eoc;
            g310 = -346.844 + 1582.851 * em - 2415.925 * eccsq + 1246.113 * eoc;
            g322 = -342.585 + 1554.908 * em - 2366.899 * eccsq + 1215.972 * eoc;
            g410 = -1052.797 + 4758.686 * em - 7193.992 * eccsq + 3651.957 * eoc;
            g422 = -3581.690 + 16178.110 * em - 24462.770 * eccsq + 12422.520 * eoc;
            g520 = if em > 0.715 {
                -5149.66 + 29936.92 * em - 54087.36 * eccsq + 31324.56 * eoc
            } else {
                1464.74 - 4664.75 * em + 3763.64 * eccsq
            };
        }

        let (g533, g521, g532);
        if em < 0.7 {
            g533 = -919.22770 + 4988.61 * em - 9064.77 * eccsq + 5542.21 * eoc;
            g521 = -822.71072 + 4568.6173 * em - 8491.4146 * eccsq + 5337.524 * eoc;
            g532 = -853.66600 + 4690.25 * em - 8624.77 * eccsq + 5341.4 * eoc;
        } else {
            g533 = -37995.78 + 161616.52 * em - 229838.2 * eccsq + 109377.94 * eoc;
            g521 = -51752.104 + 218913.95 * em - 309468.16 * eccsq + 146349.42 * eoc;
            g532 = -40023.88 + 170470.89 * em - 242699.48 * eccsq + 115605.82 * eoc;
        }

        let sini2 = sinim * sinim;
        let f220 = 0.75 * (1.0 + 2.0 * cosim + cosisq);
        let f221 = 1.5 * sini2;
        let f321 = 1.875 * sinim * (1.0 - 2.0 * cosim - 3.0 * cosisq);
        let f322 = -1.875 * sinim * (1.0 + 2.0 * cosim - 3.0 * cosisq);
        let f441 = 35.0 * sini2 * f220;
        let f442 = 39.375 * sini2 * sini2;
        let f522 = 9.84375
            * sinim
            * (sini2 * (1.0 - 2.0 * cosim - 5.0 * cosisq)
                + 1.0 / 3.0 * (-2.0 + 4.0 * cosim + 6.0 * cosisq));
        let f523 = sinim
            * (4.92187512 * sini2 * (-2.0 - 4.0 * cosim + 10.0 * cosisq)
                + 6.56250012 * (1.0 + 2.0 * cosim - 3.0 * cosisq));
        let f542 = 29.53125
            * sinim
            * (2.0 - 8.0 * cosim + cosisq * (-12.0 + 8.0 * cosim + 10.0 * cosisq));
        let f543 = 29.53125
            * sinim
            * (-2.0 - 8.0 * cosim + cosisq * (12.0 + 8.0 * cosim - 10.0 * cosisq));

        let xno2 = nm * nm;
        let ainv2 = aonv * aonv;
        let mut temp1 = 3.0 * xno2 * ainv2;
        let mut temp = temp1 * ROOT22;
        let d2201 = temp * f220 * g201;
        let d2211 = temp * f221 * g211;
        temp1 *= aonv;
        temp = temp1 * ROOT32;
        let d3210 = temp * f321 * g310;
        let d3222 = temp * f322 * g322;
        temp1 *= aonv;
        temp = 2.0 * temp1 * ROOT44;
        let d4410 = temp * f441 * g410;
        let d4422 = temp * f442 * g422;
        temp1 *= aonv;
        temp = temp1 * ROOT52;
        let d5220 = temp * f522 * g520;
        let d5232 = temp * f523 * g532;
        temp = 2.0 * temp1 * ROOT54;
        let d5421 = temp * f542 * g521;
        let d5433 = temp * f543 * g533;

        let xlamo = (init.mo + 2.0 * init.nodeo - 2.0 * theta) % TAU;
        let xfact = init.mdot + dmdt + 2.0 * (init.nodedot + dnodt - RPTIM) - init.no_unkozai;

        Resonance::HalfDay {
            d2201,
            d2211,
            d3210,
            d3222,
            d4410,
            d4422,
            d5220,
            d5232,
            d5421,
            d5433,
            xlamo,
            xfact,
        }
    } else {
        debug!(mean_motion = nm, "24-hour resonance terms active");
        let g200 = 1.0 + emsq * (-2.5 + 0.8125 * emsq);
        let g310 = 1.0 + 2.0 * emsq;
        let g300 = 1.0 + emsq * (-6.0 + 6.60937 * emsq);
        let f220 = 0.75 * (1.0 + cosim) * (1.0 + cosim);
        let f311 = 0.9375 * sinim * sinim * (1.0 + 3.0 * cosim) - 0.75 * (1.0 + cosim);
        let mut f330 = 1.0 + cosim;
        f330 = 1.875 * f330 * f330 * f330;

        let mut del1 = 3.0 * nm * nm * aonv * aonv;
        let del2 = 2.0 * del1 * f220 * g200 * Q22;
        let del3 = 3.0 * del1 * f330 * g300 * Q33 * aonv;
        del1 = del1 * f311 * g310 * Q31 * aonv;

        let xlamo = (init.mo + init.nodeo + init.argpo - theta) % TAU;
        let xpidot = init.argpdot + init.nodedot;
        let xfact = init.mdot + xpidot - RPTIM + dmdt + domdt + dnodt - init.no_unkozai;

        Resonance::Synchronous {
            del1,
            del2,
            del3,
            xlamo,
            xfact,
        }
    }
}
