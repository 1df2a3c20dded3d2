//! Propriétés : commutativité, aller-retour de localisation, idempotence.
//! Même RNG déterministe que le fuzz : pas de dépendance de test en plus.

use super::eval::Evaluateur;
use super::locale::PROFILS;
use super::localisation::Localiseur;

struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
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
    /// Entier dans [-borne, borne].
    fn entier(&mut self, borne: i64) -> i64 {
        self.pick((2 * borne + 1) as u32) as i64 - borne
    }
}

const MORCEAUX: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "-", "*", "/", "^", "!", "(", ")",
    "sin(", "cos(", "tan(", "ln(", "log(", "sqrt(", "pi", "e", "Infinity",
];

fn gen_canonique(rng: &mut Rng) -> String {
    let n = 1 + rng.pick(24) as usize;
    (0..n)
        .map(|_| MORCEAUX[rng.pick(MORCEAUX.len() as u32) as usize])
        .collect()
}

/// Fragments mêlant canonique, glyphes localisés, lettres isolées et bruit.
const FRAGMENTS_MELES: &[&str] = &[
    "1", "9", ".", ",", "\u{066B}", "۱", "۵", "٣", "५", "৭", "+", "-", "−", "*", "×", "/", "÷",
    "(", ")", " ", "sin", "sen", "cos", "tan", "ln", "log", "Infinity", "∞", "π", "√", "e", "s",
    "n", "o", "c", "l", "#", "@",
];

fn gen_mele(rng: &mut Rng) -> String {
    let n = rng.pick(32) as usize;
    (0..n)
        .map(|_| FRAGMENTS_MELES[rng.pick(FRAGMENTS_MELES.len() as u32) as usize])
        .collect()
}

fn localiseurs() -> Vec<Localiseur> {
    PROFILS
        .iter()
        .flat_map(|p| [Localiseur::new(*p, true), Localiseur::new(*p, false)])
        .collect()
}

#[test]
fn addition_commutative() {
    let ev = Evaluateur::default();
    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..250 {
        let a = rng.entier(1000);
        let b = rng.entier(1000);
        let ab = ev.evaluer(&format!("{a}+{b}"));
        let ba = ev.evaluer(&format!("{b}+{a}"));
        assert_eq!(ab.resultat(), ba.resultat(), "{a}+{b}");
        assert!(ab.resultat().is_some(), "{a}+{b} sans résultat");
    }
}

#[test]
fn multiplication_commutative() {
    let ev = Evaluateur::default();
    let mut rng = Rng::new(0xFACE_u64);

    for _ in 0..250 {
        let a = rng.entier(100);
        let b = rng.entier(100);
        let ab = ev.evaluer(&format!("{a}*{b}"));
        let ba = ev.evaluer(&format!("{b}*{a}"));
        assert_eq!(ab.resultat(), ba.resultat(), "{a}*{b}");
        assert!(ab.resultat().is_some(), "{a}*{b} sans résultat");
    }
}

#[test]
fn aller_retour_localisation() {
    let mut rng = Rng::new(0xA11E_u64);

    for loc in localiseurs() {
        for _ in 0..60 {
            let canon = gen_canonique(&mut rng);
            let local = loc.vers_localise(&canon);
            assert_eq!(
                loc.vers_canonique(&local),
                canon,
                "langue {} : {canon:?} -> {local:?}",
                loc.profil().langue
            );
        }
    }
}

#[test]
fn canonisation_idempotente() {
    let mut rng = Rng::new(0x1DE3_u64);

    for loc in localiseurs() {
        for _ in 0..60 {
            let local = loc.vers_localise(&gen_canonique(&mut rng));
            let une = loc.vers_canonique(&local);
            assert_eq!(loc.vers_canonique(&une), une, "langue {}", loc.profil().langue);
        }
    }
}

#[test]
fn resultat_independant_de_la_langue() {
    // même calcul, chaque langue : le résultat canonique est identique
    let mut rng = Rng::new(0xB0B_u64);
    let attendu = Evaluateur::default();

    for loc in localiseurs() {
        let ev = Evaluateur::new(loc.clone());
        for _ in 0..20 {
            let a = rng.entier(500);
            let b = 1 + rng.pick(50) as i64;
            let canon = format!("{a}/{b}+0.5");

            let ref_res = attendu.evaluer(&canon);
            let res = ev.evaluer(&loc.vers_localise(&canon));

            let ref_canon = ref_res.resultat().map(|r| attendu.localiseur().vers_canonique(r));
            let canon_res = res.resultat().map(|r| loc.vers_canonique(r));
            assert_eq!(canon_res, ref_canon, "langue {} : {canon}", loc.profil().langue);
        }
    }
}

#[test]
fn canonisation_idempotente_sur_texte_mele() {
    let mut rng = Rng::new(0x3E1E_u64);

    for loc in localiseurs() {
        for _ in 0..120 {
            let brut = gen_mele(&mut rng);
            let une = loc.vers_canonique(&brut);
            assert_eq!(
                loc.vers_canonique(&une),
                une,
                "langue {} : {brut:?}",
                loc.profil().langue
            );
        }
    }

    // texte partiellement canonique, cas fixes
    let es = Localiseur::pour_langue("es", true);
    for brut in ["cosen(1)", "ssen", "1,5.2", "sen∞−Infinity"] {
        let une = es.vers_canonique(brut);
        assert_eq!(es.vers_canonique(&une), une, "{brut:?}");
    }
}
