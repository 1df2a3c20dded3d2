// src/noyau/format.rs
//
// Mise en forme d’un résultat f64 pour l’affichage.
//
// Politique (déterministe) :
// - conversion EXACTE du f64 en rationnel (pas de passage par Display de f64),
// - arrondi demi-supérieur à au plus 12 chiffres significatifs,
// - zéros finaux retirés,
// - notation simple si l’exposant décimal est dans [-5, 12), sinon d.dddE±n,
// - au plus 12 caractères hors signe : on retire des chiffres jusqu’à ce que ça tienne.
//
// Exemples : log(100) -> "2", 1/3 -> "0.3333333333", 0.1+0.2 -> "0.3", 10^20 -> "1E20".

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::localisation::INFINI;

/// Largeur maximale du nombre affiché (signe exclu).
pub const MAX_LONGUEUR: usize = 12;

/// Précision du double moins les chiffres “bruités” sacrifiés à l’arrondi (17 - 5).
pub const CHIFFRES_SIGNIFICATIFS: usize = 12;

const EXPOSANT_MIN_SIMPLE: i32 = -5;
const EXPOSANT_MAX_SIMPLE: i32 = 12;

/* ------------------------ Puissances de 10 exactes ------------------------ */

fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/// 10^e en rationnel, e signé.
fn pow10_rat(e: i32) -> BigRational {
    if e >= 0 {
        BigRational::from_integer(pow10(e.unsigned_abs()))
    } else {
        BigRational::new(BigInt::one(), pow10(e.unsigned_abs()))
    }
}

/* ------------------------ Arrondi décimal ------------------------ */

/// Exposant décimal de r > 0 : 10^e <= r < 10^(e+1).
fn exposant_decimal(r: &BigRational, estimation: f64) -> i32 {
    let mut e = if estimation.is_finite() {
        estimation.log10().floor() as i32
    } else {
        0
    };

    while pow10_rat(e) > *r {
        e -= 1;
    }
    while pow10_rat(e + 1) <= *r {
        e += 1;
    }
    e
}

/// Arrondit r > 0 à `n` chiffres significatifs.
/// Renvoie (chiffres sans zéros finaux, exposant décimal du premier chiffre).
fn arrondir(r: &BigRational, estimation: f64, n: usize) -> (String, i32) {
    let mut e = exposant_decimal(r, estimation);

    // r * 10^(n-1-e), arrondi demi-supérieur (r > 0 : to_integer == floor)
    let echelle = pow10_rat(n as i32 - 1 - e);
    let demi = BigRational::new(BigInt::one(), BigInt::from(2));
    let mut m = (r * echelle + demi).to_integer();

    // retenue : 9.99… -> 10.0…
    if m >= pow10(n as u32) {
        m /= BigInt::from(10);
        e += 1;
    }

    let mut chiffres = m.to_str_radix(10);
    while chiffres.len() > 1 && chiffres.ends_with('0') {
        chiffres.pop();
    }
    (chiffres, e)
}

/// Rendu d’une mantisse (chiffres) et de son exposant décimal.
fn rendre(chiffres: &str, e: i32) -> String {
    if (EXPOSANT_MIN_SIMPLE..EXPOSANT_MAX_SIMPLE).contains(&e) {
        if e >= 0 {
            let n_ent = e as usize + 1;
            if chiffres.len() <= n_ent {
                let mut s = chiffres.to_string();
                s.push_str(&"0".repeat(n_ent - chiffres.len()));
                s
            } else {
                format!("{}.{}", &chiffres[..n_ent], &chiffres[n_ent..])
            }
        } else {
            let zeros = "0".repeat((-e - 1) as usize);
            format!("0.{zeros}{chiffres}")
        }
    } else {
        let (tete, queue) = chiffres.split_at(1);
        if queue.is_empty() {
            format!("{tete}E{e}")
        } else {
            format!("{tete}.{queue}E{e}")
        }
    }
}

/// f64 -> texte canonique (ASCII, '.' décimal, exposant 'E').
///
/// ±∞ -> "Infinity" / "-Infinity" ; NaN -> "NaN" (l’évaluateur ne l’affiche jamais).
pub fn formater_resultat(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 {
            INFINI.to_string()
        } else {
            format!("-{INFINI}")
        };
    }
    if x == 0.0 {
        // -0 compris
        return "0".to_string();
    }

    let signe = if x < 0.0 { "-" } else { "" };
    let abs = x.abs();
    let r = match BigRational::from_float(abs) {
        Some(r) if r.is_positive() && !r.is_zero() => r,
        _ => return "0".to_string(),
    };

    let mut n = CHIFFRES_SIGNIFICATIFS;
    loop {
        let (chiffres, e) = arrondir(&r, abs, n);
        let texte = rendre(&chiffres, e);
        if texte.len() <= MAX_LONGUEUR || n == 1 {
            return format!("{signe}{texte}");
        }
        n -= 1;
    }
}
