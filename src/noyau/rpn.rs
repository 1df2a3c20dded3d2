// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> f64
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis évaluer la RPN sur une pile de f64
//
// Règles:
// - Opérateurs préfixes (moins unaire, fonctions) : empilés sans rien dépiler,
//   sortis quand un opérateur moins prioritaire arrive (ou en fin).
//   Priorités : + - (1) < * / (2) < moins unaire (3) < ^ (4) < fonctions (5)
//   => -2^2 = -4, √4^2 = 4, sin(x)+1 = (sin x)+1
// - '!' est postfixe : sorti directement sur la file de sortie.
// - Deux valeurs adjacentes => multiplication implicite (2π, 2(3), (1)(2)),
//   sauf deux nombres littéraux ("1 000", "2 3") : erreur.

use std::f64::consts::{E, PI};

use super::jetons::Tok;
use super::moteur::ErreurMoteur;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Ln,
    Log,
    Sqrt,
}

impl Fonction {
    fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "ln" => Some(Self::Ln),
            "log" => Some(Self::Log),
            "sqrt" => Some(Self::Sqrt),
            _ => None,
        }
    }

    fn nom(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Sqrt => "√",
        }
    }

    fn appliquer(self, x: f64) -> f64 {
        match self {
            Self::Sin => sinus(x),
            Self::Cos => cosinus(x),
            Self::Tan => sinus(x) / cosinus(x),
            Self::Ln => x.ln(),
            Self::Log => x.log10(),
            Self::Sqrt => x.sqrt(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
    Neg,
    Fonction(Fonction),
}

impl Operateur {
    fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Moins => 1,
            Self::Fois | Self::Divise => 2,
            Self::Neg => 3,
            Self::Puissance => 4,
            Self::Fonction(_) => 5,
        }
    }

    fn est_associatif_droite(self) -> bool {
        matches!(self, Self::Puissance | Self::Neg | Self::Fonction(_))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementRpn {
    Nombre(f64),
    Op(Operateur),
    Factorielle,
}

#[derive(Clone, Copy, Debug)]
enum SurPile {
    ParG(usize),
    Op(Operateur),
}

fn constante(nom: &str) -> Option<f64> {
    match nom {
        "pi" => Some(PI),
        "e" => Some(E),
        "Infinity" => Some(f64::INFINITY),
        _ => None,
    }
}

/// Dépile ce qui doit sortir avant `op`, puis empile `op`.
fn empiler_binaire(op: Operateur, ops: &mut Vec<SurPile>, out: &mut Vec<ElementRpn>) {
    while let Some(SurPile::Op(top)) = ops.last() {
        let top = *top;
        let doit_pop = if op.est_associatif_droite() {
            top.precedence() > op.precedence()
        } else {
            top.precedence() >= op.precedence()
        };
        if !doit_pop {
            break;
        }
        out.push(ElementRpn::Op(top));
        ops.pop();
    }
    ops.push(SurPile::Op(op));
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// `fin` = longueur du texte source (position rapportée si un opérande manque à la fin).
///
/// Exemple:
///   jetons: [Ident("sin"), LPar, Ident("pi"), Slash, Num(2), RPar]
///   rpn:    [π, 2, /, sin]
pub fn to_rpn(tokens: &[(usize, Tok)], fin: usize) -> Result<Vec<ElementRpn>, ErreurMoteur> {
    let mut out: Vec<ElementRpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<SurPile> = Vec::new();

    // true tant qu’on attend un opérande (début, après un opérateur, après '(')
    let mut attend_valeur = true;
    let mut apres_nombre = false;

    for (pos, tok) in tokens.iter() {
        let pos = *pos;
        if apres_nombre && matches!(tok, Tok::Num(_)) {
            return Err(ErreurMoteur::NombreInattendu(pos));
        }
        apres_nombre = matches!(tok, Tok::Num(_));

        match tok {
            Tok::Num(x) => {
                if !attend_valeur {
                    empiler_binaire(Operateur::Fois, &mut ops, &mut out);
                }
                out.push(ElementRpn::Nombre(*x));
                attend_valeur = false;
            }

            Tok::Ident(nom) => {
                if !attend_valeur {
                    empiler_binaire(Operateur::Fois, &mut ops, &mut out);
                }
                if let Some(v) = constante(nom) {
                    out.push(ElementRpn::Nombre(v));
                    attend_valeur = false;
                } else if let Some(f) = Fonction::depuis_nom(nom) {
                    ops.push(SurPile::Op(Operateur::Fonction(f)));
                    attend_valeur = true;
                } else {
                    return Err(ErreurMoteur::IdentifiantInconnu(pos, (*nom).to_string()));
                }
            }

            Tok::LPar => {
                if !attend_valeur {
                    empiler_binaire(Operateur::Fois, &mut ops, &mut out);
                }
                ops.push(SurPile::ParG(pos));
                attend_valeur = true;
            }

            Tok::RPar => {
                if attend_valeur {
                    return Err(ErreurMoteur::OperandeManquant(pos));
                }
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(SurPile::ParG(_)) => break,
                        Some(SurPile::Op(op)) => out.push(ElementRpn::Op(op)),
                        None => return Err(ErreurMoteur::ParentheseInattendue(pos)),
                    }
                }
                attend_valeur = false;
            }

            Tok::Plus => {
                // plus unaire : sans effet
                if !attend_valeur {
                    empiler_binaire(Operateur::Plus, &mut ops, &mut out);
                    attend_valeur = true;
                }
            }

            Tok::Minus => {
                if attend_valeur {
                    ops.push(SurPile::Op(Operateur::Neg));
                } else {
                    empiler_binaire(Operateur::Moins, &mut ops, &mut out);
                    attend_valeur = true;
                }
            }

            Tok::Star | Tok::Slash | Tok::Caret => {
                let (op, c) = match tok {
                    Tok::Star => (Operateur::Fois, '*'),
                    Tok::Slash => (Operateur::Divise, '/'),
                    _ => (Operateur::Puissance, '^'),
                };
                if attend_valeur {
                    return Err(ErreurMoteur::OperateurInattendu(pos, c));
                }
                empiler_binaire(op, &mut ops, &mut out);
                attend_valeur = true;
            }

            Tok::Bang => {
                if attend_valeur {
                    return Err(ErreurMoteur::OperateurInattendu(pos, '!'));
                }
                out.push(ElementRpn::Factorielle);
            }
        }
    }

    if attend_valeur {
        return Err(ErreurMoteur::OperandeManquant(fin));
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        match top {
            SurPile::ParG(p) => return Err(ErreurMoteur::ParentheseNonFermee(p)),
            SurPile::Op(op) => out.push(ElementRpn::Op(op)),
        }
    }

    Ok(out)
}

/// Évalue une RPN. Les cas IEEE (÷0, NaN) passent tels quels : c’est à
/// l’appelant de classer ±∞ / NaN.
pub fn evaluer_rpn(rpn: &[ElementRpn]) -> Result<f64, ErreurMoteur> {
    let mut st: Vec<f64> = Vec::with_capacity(16);

    for el in rpn {
        match *el {
            ElementRpn::Nombre(x) => st.push(x),

            ElementRpn::Factorielle => {
                let x = st.pop().ok_or(ErreurMoteur::OperandeManquant(0))?;
                st.push(factorielle(x));
            }

            ElementRpn::Op(Operateur::Neg) => {
                let x = st.pop().ok_or(ErreurMoteur::OperandeManquant(0))?;
                st.push(-x);
            }

            ElementRpn::Op(Operateur::Fonction(f)) => {
                let x = st.pop().ok_or(ErreurMoteur::OperandeManquant(0))?;
                st.push(f.appliquer(x));
            }

            ElementRpn::Op(op) => {
                let b = st.pop().ok_or(ErreurMoteur::OperandeManquant(0))?;
                let a = st.pop().ok_or(ErreurMoteur::OperandeManquant(0))?;
                let v = match op {
                    Operateur::Plus => a + b,
                    Operateur::Moins => a - b,
                    Operateur::Fois => a * b,
                    Operateur::Divise => a / b,
                    _ => a.powf(b),
                };
                st.push(v);
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(ErreurMoteur::OperandeManquant(0)),
    }
}

/// Format utilitaire (trace) : RPN en texte.
pub fn format_rpn(rpn: &[ElementRpn]) -> String {
    let mut out = Vec::with_capacity(rpn.len());
    for el in rpn {
        let s = match el {
            ElementRpn::Nombre(x) => format!("{x}"),
            ElementRpn::Factorielle => "!".to_string(),
            ElementRpn::Op(op) => match op {
                Operateur::Plus => "+".to_string(),
                Operateur::Moins => "-".to_string(),
                Operateur::Fois => "*".to_string(),
                Operateur::Divise => "/".to_string(),
                Operateur::Puissance => "^".to_string(),
                Operateur::Neg => "neg".to_string(),
                Operateur::Fonction(f) => f.nom().to_string(),
            },
        };
        out.push(s);
    }
    out.join(" ")
}

/* ------------------------ Trig : multiples de π/2 exacts ------------------------ */

/// Vrai si `k` est (à l’arrondi binaire près) un entier.
fn quasi_entier(k: f64) -> bool {
    k.is_finite() && k.abs() < 1e9 && (k - k.round()).abs() < 1e-12
}

/// sin(kπ) = 0 exactement pour k != 0 (sinon sin(π) = 1.2e-16 s’afficherait).
/// Près de 0, sin(x) ≈ x : pas d’arrondi.
fn sinus(x: f64) -> f64 {
    let k = x / PI;
    if k.round() != 0.0 && quasi_entier(k) {
        0.0
    } else {
        x.sin()
    }
}

/// cos(π/2 + kπ) = 0 exactement.
fn cosinus(x: f64) -> f64 {
    if quasi_entier(x / PI - 0.5) {
        0.0
    } else {
        x.cos()
    }
}

/* ------------------------ Factorielle / Gamma ------------------------ */

/// n! pour n entier >= 0, Γ(x+1) sinon ; NaN sur les entiers négatifs.
fn factorielle(x: f64) -> f64 {
    if x.is_nan() || x == f64::NEG_INFINITY {
        return f64::NAN;
    }
    if x == f64::INFINITY {
        return f64::INFINITY;
    }
    if x == x.trunc() {
        if x < 0.0 {
            return f64::NAN;
        }
        if x > 170.0 {
            return f64::INFINITY;
        }
        let mut acc = 1.0_f64;
        let mut k = 2.0_f64;
        while k <= x {
            acc *= k;
            k += 1.0;
        }
        return acc;
    }
    gamma(x + 1.0)
}

/// Au-delà, Γ(x) dépasse f64::MAX.
const GAMMA_MAX: f64 = 171.7;

/// Γ(x) par Lanczos (g = 7, 9 coefficients), réflexion pour x < 1/2.
fn gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x > GAMMA_MAX {
        return f64::INFINITY;
    }
    if x < 0.5 {
        let g = gamma(1.0 - x);
        if g.is_infinite() {
            return 0.0;
        }
        return PI / ((PI * x).sin() * g);
    }

    let x = x - 1.0;
    let mut a = COEFFS[0];
    let t = x + G + 0.5;
    for (i, c) in COEFFS.iter().enumerate().skip(1) {
        a += c / (x + i as f64);
    }
    // t^(x+1/2) en deux moitiés : pas de dépassement intermédiaire près de GAMMA_MAX
    let moitie = t.powf((x + 0.5) / 2.0);
    (2.0 * PI).sqrt() * moitie * ((-t).exp() * moitie) * a
}
