// src/noyau/jetons.rs

use super::moteur::ErreurMoteur;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions + constantes (noms canoniques : "sin", "sqrt", "pi", "Infinity", …)
    Ident(&'static str),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
    Bang,  // ! (factorielle, postfixe)

    LPar,
    RPar,
}

/// Noms reconnus, du plus long au plus court (découpage glouton de "sinpi", "ee", …).
const NOMS: &[&str] = &[
    "Infinity", "sqrt", "sin", "cos", "tan", "log", "ln", "pi", "e",
];

/// Tokenize une chaîne canonique en jetons, avec leur position (octets).
/// Supporte:
/// - nombres décimaux (12, 1.5, .5, 5.) et exposant majuscule (1.5E-7)
/// - opérateurs + - * / ^ !
/// - parenthèses ( )
/// - π, √, ∞ (équivalent de pi, sqrt, Infinity)
/// - noms de fonctions/constantes, collés ou non ("2sinpi" -> 2 sin pi)
pub fn tokenize(s: &str) -> Result<Vec<(usize, Tok)>, ErreurMoteur> {
    let mut out = Vec::new();
    let mut it = s.char_indices().peekable();

    while let Some(&(i, c)) = it.peek() {
        if c.is_whitespace() {
            it.next();
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '!' => Some(Tok::Bang),
            'π' => Some(Tok::Ident("pi")),
            '√' => Some(Tok::Ident("sqrt")),
            '∞' => Some(Tok::Ident("Infinity")),
            _ => None,
        };
        if let Some(t) = simple {
            out.push((i, t));
            it.next();
            continue;
        }

        // Nombre : chiffres + au plus un '.', puis exposant optionnel E[+-]chiffres
        if c.is_ascii_digit() || c == '.' {
            let mut fin = i;
            let mut points = 0usize;
            while let Some(&(j, d)) = it.peek() {
                if d.is_ascii_digit() {
                    fin = j + 1;
                } else if d == '.' {
                    points += 1;
                    fin = j + 1;
                } else {
                    break;
                }
                it.next();
            }
            let mantisse = &s[i..fin];
            if points > 1 || !mantisse.bytes().any(|b| b.is_ascii_digit()) {
                return Err(ErreurMoteur::NombreInvalide(i));
            }

            let exposant = lire_exposant(&s[fin..]);
            for _ in 0..exposant.len() {
                it.next();
            }

            // "5." / ".5" : on complète pour le parse
            let mut texte = String::with_capacity(mantisse.len() + exposant.len() + 2);
            if mantisse.starts_with('.') {
                texte.push('0');
            }
            texte.push_str(mantisse);
            if mantisse.ends_with('.') {
                texte.push('0');
            }
            texte.push_str(&exposant.replace('E', "e"));

            let x: f64 = texte.parse().map_err(|_| ErreurMoteur::NombreInvalide(i))?;
            out.push((i, Tok::Num(x)));
            continue;
        }

        // Lettres : découpage en noms connus
        if c.is_ascii_alphabetic() {
            let mut fin = i;
            while let Some(&(j, d)) = it.peek() {
                if !d.is_ascii_alphabetic() {
                    break;
                }
                fin = j + d.len_utf8();
                it.next();
            }

            let mut pos = i;
            while pos < fin {
                let reste = &s[pos..fin];
                match NOMS.iter().find(|n| reste.starts_with(**n)) {
                    Some(&nom) => {
                        out.push((pos, Tok::Ident(nom)));
                        pos += nom.len();
                    }
                    None => {
                        return Err(ErreurMoteur::IdentifiantInconnu(pos, reste.to_string()));
                    }
                }
            }
            continue;
        }

        return Err(ErreurMoteur::CaractereInattendu(i, c));
    }

    Ok(out)
}

/// "E12", "E-7", "E+3" en tête de `s` (vide sinon). 'E' seul n’est pas un exposant.
fn lire_exposant(s: &str) -> &str {
    let b = s.as_bytes();
    if b.first() != Some(&b'E') {
        return "";
    }
    let mut k = 1;
    if matches!(b.get(k), Some(b'+') | Some(b'-')) {
        k += 1;
    }
    let debut_chiffres = k;
    while b.get(k).is_some_and(|x| x.is_ascii_digit()) {
        k += 1;
    }
    if k == debut_chiffres {
        return "";
    }
    &s[..k]
}

/// Format utilitaire (trace) : liste de jetons en texte.
pub fn format_tokens(tokens: &[(usize, Tok)]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for (_, t) in tokens {
        let s = match t {
            Tok::Num(x) => format!("{x}"),
            Tok::Ident(name) => (*name).to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Bang => "!".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
