use regex::Regex;

/// Canonical activity categories a commission event resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Act,
    Residual,
    Deact,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Act => "ACT",
            Self::Residual => "RESIDUAL",
            Self::Deact => "DEACT",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observable hint in a raw transaction record. Raw-type probes run
/// against the uppercased activity code; note/cycle probes against the
/// lowercased free text.
#[derive(Debug, Clone, Copy)]
enum Signal {
    RawWord(&'static str),
    RawContains(&'static str),
    NoteContains(&'static str),
    CycleContains(&'static str),
    NegativeAmount,
}

/// Ordered cascade, first match wins. Chargeback/clawback language and the
/// amount sign must be probed before any upfront/residual language: a
/// negative "residual chargeback" row is a DEACT, not a residual. Whole-word
/// probes keep "ACT" from firing inside "DEACT" or "CONTRACT".
const RULES: &[(Signal, Category)] = &[
    (Signal::RawWord("DEACT"), Category::Deact),
    (Signal::RawContains("CHARGEBACK"), Category::Deact),
    (Signal::RawContains("CLAWBACK"), Category::Deact),
    (Signal::NoteContains("chargeback"), Category::Deact),
    (Signal::NoteContains("clawback"), Category::Deact),
    (Signal::NoteContains("deact"), Category::Deact),
    (Signal::NegativeAmount, Category::Deact),
    (Signal::RawWord("ACT"), Category::Act),
    (Signal::RawContains("ACTIVATION"), Category::Act),
    (Signal::RawContains("UPFRONT"), Category::Act),
    (Signal::RawContains("UP FRONT"), Category::Act),
    (Signal::RawContains("UP-FRONT"), Category::Act),
    (Signal::NoteContains("activation"), Category::Act),
    (Signal::NoteContains("upfront"), Category::Act),
    (Signal::NoteContains("up front"), Category::Act),
    (Signal::NoteContains("up-front"), Category::Act),
    (Signal::NoteContains("component:upfront"), Category::Act),
    (Signal::NoteContains("product type:gross adds"), Category::Act),
    (Signal::CycleContains("upfront"), Category::Act),
    (Signal::CycleContains("up front"), Category::Act),
    (Signal::CycleContains("up-front"), Category::Act),
    (Signal::RawWord("RESIDUAL"), Category::Residual),
    (Signal::RawContains("RESID"), Category::Residual),
    (Signal::RawContains("SPIF"), Category::Residual),
    (Signal::NoteContains("spif"), Category::Residual),
    (Signal::NoteContains("residual"), Category::Residual),
    (Signal::NoteContains("recurring"), Category::Residual),
    (Signal::NoteContains("monthly"), Category::Residual),
];

fn contains_word(haystack: &str, word: &str) -> bool {
    Regex::new(&format!(r"\b{word}\b"))
        .map(|re| re.is_match(haystack))
        .unwrap_or(false)
}

/// Classify a raw transaction record into its canonical category.
///
/// Pure function over the four noisy input fields; most carrier rows are
/// recurring commissions, so anything without a recognizable signal falls
/// through to Residual.
pub fn classify(raw_type: &str, note: &str, cycle: &str, amount: f64) -> Category {
    let raw = raw_type.trim().to_uppercase();
    let note = note.to_lowercase();
    let cycle = cycle.to_lowercase();

    for (signal, category) in RULES {
        let hit = match signal {
            Signal::RawWord(w) => contains_word(&raw, w),
            Signal::RawContains(s) => raw.contains(s),
            Signal::NoteContains(s) => note.contains(s),
            Signal::CycleContains(s) => cycle.contains(s),
            Signal::NegativeAmount => amount < 0.0,
        };
        if hit {
            return *category;
        }
    }
    Category::Residual
}

/// A transaction with its derived category and payout facets. Recomputed on
/// every read, never persisted, so the rule table can evolve without a data
/// migration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classified {
    pub amount: f64,
    pub category: Category,
    pub is_upfront: bool,
    pub is_monthly: bool,
    pub is_chargeback: bool,
}

/// Derive the payout facets for one transaction. At most one facet is true;
/// a zero-amount row has none and still counts toward the net total.
pub fn classify_transaction(raw_type: &str, note: &str, cycle: &str, amount: f64) -> Classified {
    let category = classify(raw_type, note, cycle, amount);
    let is_chargeback = amount < 0.0 || category == Category::Deact;
    let is_upfront = category == Category::Act && amount > 0.0 && !is_chargeback;
    let is_monthly = category == Category::Residual && amount > 0.0 && !is_chargeback;
    Classified {
        amount,
        category,
        is_upfront,
        is_monthly,
        is_chargeback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deact_signals() {
        assert_eq!(classify("DEACT", "", "", 10.0), Category::Deact);
        assert_eq!(classify("RESIDUAL CHARGEBACK", "", "", 10.0), Category::Deact);
        assert_eq!(classify("", "clawback on early term", "", 10.0), Category::Deact);
        assert_eq!(classify("", "deactivated 30 days", "", 10.0), Category::Deact);
    }

    #[test]
    fn test_negative_amount_is_deact() {
        assert_eq!(classify("RESIDUAL", "monthly residual", "", -5.0), Category::Deact);
        assert_eq!(classify("ACT", "activation", "", -150.0), Category::Deact);
    }

    #[test]
    fn test_act_signals() {
        assert_eq!(classify("ACT", "", "", 100.0), Category::Act);
        assert_eq!(classify("NEW ACTIVATION", "", "", 100.0), Category::Act);
        assert_eq!(classify("", "Component:Upfront", "", 100.0), Category::Act);
        assert_eq!(classify("", "Product Type:Gross Adds", "", 100.0), Category::Act);
        assert_eq!(classify("", "up-front comp", "", 100.0), Category::Act);
        assert_eq!(classify("", "", "UPFRONT NOV 2025", 100.0), Category::Act);
    }

    #[test]
    fn test_residual_signals() {
        assert_eq!(classify("RESIDUAL", "", "", 10.0), Category::Residual);
        assert_eq!(classify("RESID CMP", "", "", 10.0), Category::Residual);
        assert_eq!(classify("SPIFF", "", "", 10.0), Category::Residual);
        assert_eq!(classify("", "account maintenance spif", "", 10.0), Category::Residual);
        assert_eq!(classify("", "recurring comp", "", 10.0), Category::Residual);
    }

    #[test]
    fn test_word_boundary_keeps_contract_out_of_act() {
        assert_eq!(classify("CONTRACT", "", "", 10.0), Category::Residual);
    }

    #[test]
    fn test_act_inside_deact_does_not_fire() {
        // "ACT" appears inside "DEACT"; whole-word probing and rule order
        // must both hold for this to resolve as Deact.
        assert_eq!(classify("DEACT FEE", "", "", 25.0), Category::Deact);
    }

    #[test]
    fn test_default_is_residual() {
        assert_eq!(classify("", "", "", 10.0), Category::Residual);
        assert_eq!(classify("MISC", "adjustment", "11/2025", 10.0), Category::Residual);
    }

    #[test]
    fn test_classify_is_pure() {
        let a = classify("ACT", "activation", "11/2025", 150.0);
        let b = classify("ACT", "activation", "11/2025", 150.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_facets_upfront() {
        let c = classify_transaction("ACT", "", "", 150.0);
        assert!(c.is_upfront && !c.is_monthly && !c.is_chargeback);
    }

    #[test]
    fn test_facets_monthly() {
        let c = classify_transaction("RESIDUAL", "", "", 12.5);
        assert!(c.is_monthly && !c.is_upfront && !c.is_chargeback);
    }

    #[test]
    fn test_facets_negative_amount_dominates() {
        let c = classify_transaction("ACT", "activation", "", -150.0);
        assert!(c.is_chargeback && !c.is_upfront && !c.is_monthly);
    }

    #[test]
    fn test_facets_zero_amount_act_has_none() {
        let c = classify_transaction("ACT", "", "", 0.0);
        assert_eq!(c.category, Category::Act);
        assert!(!c.is_upfront && !c.is_monthly && !c.is_chargeback);
    }

    #[test]
    fn test_facets_mutually_exclusive() {
        let cases = [
            ("ACT", "", "", 100.0),
            ("RESIDUAL", "", "", 5.0),
            ("DEACT", "", "", 50.0),
            ("", "chargeback", "", -25.0),
            ("", "", "", 0.0),
            ("SPIF", "", "", 30.0),
        ];
        for (raw, note, cycle, amount) in cases {
            let c = classify_transaction(raw, note, cycle, amount);
            let set = [c.is_upfront, c.is_monthly, c.is_chargeback]
                .iter()
                .filter(|b| **b)
                .count();
            assert!(set <= 1, "{raw:?}/{note:?}/{amount} set {set} facets");
        }
    }
}
