//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - budget temps global
//! - invariant clé : le rappel est appelé exactement une fois, jamais de panique

use std::time::{Duration, Instant};

use super::eval::{CodeErreur, Evaluateur};
use super::localisation::Localiseur;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

const ALPHABET: &str = "0123456789+-*/().,∞√^!e@#$%&abcdefghijklmnopqrstuvwxyz ×÷−π";

fn gen_texte(rng: &mut Rng, alphabet: &[char]) -> String {
    let n = rng.pick(48) as usize;
    (0..n)
        .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
        .collect()
}

/// Évalue et vérifie l’unicité du rappel. Renvoie (expression, résultat, code).
fn une_fois(ev: &Evaluateur, s: &str) -> (String, Option<String>, CodeErreur) {
    let mut appels = 0usize;
    let mut recu = (String::new(), None, CodeErreur::Aucune);
    ev.evaluate(s, |expr, resultat, code| {
        appels += 1;
        recu = (expr.to_string(), resultat.map(str::to_string), code);
    });
    assert_eq!(appels, 1, "rappel appelé {appels} fois pour {s:?}");
    recu
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_rappel_unique_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);

    let alphabet: Vec<char> = ALPHABET.chars().collect();
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_err = 0usize;

    for langue in ["en", "fr", "fa"] {
        let ev = Evaluateur::new(Localiseur::pour_langue(langue, true));

        for _ in 0..350 {
            budget(t0, max);

            let s = gen_texte(&mut rng, &alphabet);
            let (_expr, resultat, code) = une_fois(&ev, &s);

            // une erreur n’a jamais de résultat
            if code.est_erreur() {
                assert!(resultat.is_none(), "erreur avec résultat pour {s:?}");
                seen_err += 1;
            }
        }
    }

    // sinon le fuzz ne “balaye” rien
    assert!(seen_err > 10, "trop peu d’erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_determinisme() {
    let alphabet: Vec<char> = ALPHABET.chars().collect();
    let ev = Evaluateur::default();

    let mut a = Rng::new(0xBADC0DE_u64);
    let mut b = a.clone();

    for _ in 0..100 {
        let sa = gen_texte(&mut a, &alphabet);
        let sb = gen_texte(&mut b, &alphabet);
        assert_eq!(sa, sb);
        assert_eq!(une_fois(&ev, &sa), une_fois(&ev, &sb));
    }
}

#[test]
fn fuzz_safe_imbrication_profonde() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);
    let ev = Evaluateur::default();

    let n = 2000;
    let s = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    let (_, resultat, code) = une_fois(&ev, &s);
    budget(t0, max);
    assert_eq!(code, CodeErreur::Aucune);
    assert_eq!(resultat.as_deref(), Some("1"));

    // parenthèses non fermées : erreur, pas de panique
    let s = format!("{}1", "(".repeat(n));
    assert_eq!(une_fois(&ev, &s).2, CodeErreur::Syntaxe);
}

#[test]
fn fuzz_safe_entree_trop_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);
    let ev = Evaluateur::default();

    // au-delà de la borne de jetons : erreur de syntaxe propre
    let s = format!("{}1", "1+".repeat(3000));
    let (_, resultat, code) = une_fois(&ev, &s);
    budget(t0, max);
    assert_eq!(code, CodeErreur::Syntaxe);
    assert!(resultat.is_none());

    // nombre géant : +∞ en f64
    let s = format!("{}+1", "9".repeat(400));
    let (_, resultat, code) = une_fois(&ev, &s);
    assert_eq!(code, CodeErreur::Aucune);
    assert_eq!(resultat.as_deref(), Some("∞"));
}
