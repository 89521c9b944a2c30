//! Bilingual (English and Portuguese) polarity lexicon

use super::PolarityAnalyzer;
use std::collections::HashMap;

/// How many tokens a negation or intensifier reaches forward
const MODIFIER_WINDOW: usize = 3;

const POSITIVE: &[(&str, f64)] = &[
    // English
    ("bullish", 0.8),
    ("surge", 0.7),
    ("surges", 0.7),
    ("rally", 0.7),
    ("soar", 0.8),
    ("soars", 0.8),
    ("gain", 0.5),
    ("gains", 0.5),
    ("profit", 0.6),
    ("profits", 0.6),
    ("growth", 0.6),
    ("rise", 0.5),
    ("rises", 0.5),
    ("increase", 0.5),
    ("improve", 0.5),
    ("improves", 0.5),
    ("outperform", 0.7),
    ("beat", 0.6),
    ("exceed", 0.6),
    ("strong", 0.5),
    ("positive", 0.5),
    ("optimistic", 0.6),
    ("optimism", 0.6),
    ("confident", 0.5),
    ("record", 0.6),
    ("upgrade", 0.6),
    ("recovery", 0.5),
    ("rebound", 0.5),
    ("good", 0.5),
    ("great", 0.7),
    ("excellent", 0.8),
    ("success", 0.7),
    ("win", 0.6),
    ("approval", 0.4),
    // Portuguese
    ("alta", 0.5),
    ("sobe", 0.5),
    ("subiu", 0.5),
    ("subir", 0.5),
    ("valoriza", 0.6),
    ("valorização", 0.6),
    ("lucro", 0.6),
    ("lucros", 0.6),
    ("ganho", 0.5),
    ("ganhos", 0.5),
    ("recorde", 0.6),
    ("crescimento", 0.6),
    ("cresce", 0.5),
    ("forte", 0.5),
    ("positivo", 0.5),
    ("positiva", 0.5),
    ("otimismo", 0.6),
    ("otimista", 0.6),
    ("recuperação", 0.5),
    ("avanço", 0.5),
    ("avança", 0.5),
    ("bom", 0.5),
    ("boa", 0.5),
    ("ótimo", 0.7),
    ("ótima", 0.7),
    ("excelente", 0.8),
    ("sucesso", 0.7),
    ("aprovação", 0.4),
    ("melhora", 0.5),
    ("dispara", 0.6),
    ("supera", 0.6),
];

const NEGATIVE: &[(&str, f64)] = &[
    // English
    ("bearish", -0.8),
    ("crash", -0.9),
    ("plunge", -0.8),
    ("plunges", -0.8),
    ("drop", -0.6),
    ("drops", -0.6),
    ("fall", -0.5),
    ("falls", -0.5),
    ("decline", -0.6),
    ("loss", -0.6),
    ("losses", -0.6),
    ("decrease", -0.5),
    ("weak", -0.5),
    ("negative", -0.5),
    ("pessimistic", -0.6),
    ("concern", -0.5),
    ("worry", -0.5),
    ("fear", -0.6),
    ("fears", -0.6),
    ("risk", -0.4),
    ("uncertainty", -0.5),
    ("miss", -0.6),
    ("disappoint", -0.7),
    ("downgrade", -0.6),
    ("crisis", -0.8),
    ("warning", -0.5),
    ("trouble", -0.6),
    ("problem", -0.5),
    ("fail", -0.7),
    ("fails", -0.7),
    ("scam", -0.9),
    ("fraud", -0.9),
    ("bad", -0.5),
    ("terrible", -0.8),
    ("collapse", -0.9),
    ("bankruptcy", -0.9),
    // Portuguese
    ("queda", -0.6),
    ("cai", -0.5),
    ("caiu", -0.5),
    ("despenca", -0.8),
    ("desaba", -0.8),
    ("prejuízo", -0.6),
    ("perda", -0.6),
    ("perdas", -0.6),
    ("crise", -0.8),
    ("fraco", -0.5),
    ("fraca", -0.5),
    ("negativo", -0.5),
    ("negativa", -0.5),
    ("pessimismo", -0.6),
    ("medo", -0.6),
    ("risco", -0.4),
    ("incerteza", -0.5),
    ("ruim", -0.5),
    ("péssimo", -0.8),
    ("fraude", -0.9),
    ("golpe", -0.8),
    ("escândalo", -0.8),
    ("investigação", -0.4),
    ("desvalorização", -0.6),
    ("recua", -0.4),
    ("recuo", -0.4),
    ("alerta", -0.4),
    ("colapso", -0.9),
    ("falência", -0.9),
    ("rebaixa", -0.6),
    ("multa", -0.5),
    ("corrupção", -0.9),
    ("greve", -0.5),
    ("demissões", -0.6),
];

const NEGATIONS: &[&str] = &[
    // English; contractions split at the apostrophe, so "doesn't" arrives as "doesn"
    // "no" is left out: in Portuguese it means "in the"
    "not", "never", "neither", "nobody", "nothing", "none", "cannot", "without",
    "don", "doesn", "didn", "won", "wouldn", "shouldn", "couldn", "isn", "aren", "wasn",
    "weren", "hardly", "barely",
    // Portuguese
    "não", "nao", "nunca", "jamais", "nem", "nenhum", "nenhuma", "sem",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.5),
    ("extremely", 2.0),
    ("highly", 1.5),
    ("significantly", 1.5),
    ("dramatically", 1.8),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("muito", 1.5),
    ("extremamente", 2.0),
    ("altamente", 1.5),
    ("fortemente", 1.5),
    ("bastante", 1.3),
    ("levemente", 0.5),
    ("ligeiramente", 0.5),
];

/// Averaging lexicon analyzer
///
/// Tokens are maximal runs of alphanumeric characters, lower-cased. Each
/// token found in the lexicon contributes its score; a negation flips the
/// next scored token and an intensifier scales it, as long as that token is
/// at most three tokens away. The polarity is the mean of the contributions
/// clamped to [-1, 1], or 0.0 when nothing matched.
///
/// ```
/// use agent_news::sentiment::{LexiconAnalyzer, PolarityAnalyzer};
///
/// let analyzer = LexiconAnalyzer::new();
/// assert!(analyzer.polarity("Bitcoin dispara e bate recorde") > 0.1);
/// assert!(analyzer.polarity("Ações não sobem, mercado em crise") < -0.1);
/// ```
#[derive(Debug, Clone)]
pub struct LexiconAnalyzer {
    words: HashMap<String, f64>,
    negations: Vec<String>,
    intensifiers: HashMap<String, f64>,
}

/// Detailed outcome of one [`LexiconAnalyzer::analyze`] call
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconScore {
    pub polarity: f64,
    /// Scored tokens with their final contribution
    pub matched: Vec<(String, f64)>,
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconAnalyzer {
    pub fn new() -> Self {
        let words = POSITIVE
            .iter()
            .chain(NEGATIVE)
            .map(|(word, score)| ((*word).to_string(), *score))
            .collect();

        Self {
            words,
            negations: NEGATIONS.iter().map(|w| (*w).to_string()).collect(),
            intensifiers: INTENSIFIERS
                .iter()
                .map(|(word, mult)| ((*word).to_string(), *mult))
                .collect(),
        }
    }

    /// Add or replace a word
    pub fn add_word(&mut self, word: &str, score: f64) {
        self.words.insert(word.to_lowercase(), score);
    }

    pub fn word_score(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(&word.to_lowercase())
    }

    pub fn analyze(&self, text: &str) -> LexiconScore {
        let mut matched = Vec::new();

        // (tokens left in the window, multiplier)
        let mut negation: Option<usize> = None;
        let mut intensifier: Option<(usize, f64)> = None;

        for token in tokenize(text) {
            if self.negations.contains(&token) {
                negation = Some(MODIFIER_WINDOW);
                continue;
            }

            if let Some(mult) = self.intensifiers.get(&token) {
                intensifier = Some((MODIFIER_WINDOW, *mult));
                continue;
            }

            if let Some(base) = self.words.get(&token) {
                let mut score = *base;
                if negation.take().is_some() {
                    score = -score;
                }
                if let Some((_, mult)) = intensifier.take() {
                    score *= mult;
                }
                matched.push((token, score));
                continue;
            }

            negation = negation.and_then(|left| left.checked_sub(1)).filter(|left| *left > 0);
            intensifier = intensifier
                .and_then(|(left, mult)| left.checked_sub(1).map(|left| (left, mult)))
                .filter(|(left, _)| *left > 0);
        }

        let polarity = if matched.is_empty() {
            0.0
        } else {
            let count = matched.len() as f64;
            (matched.iter().map(|(_, score)| score).sum::<f64>() / count).clamp(-1.0, 1.0)
        };

        LexiconScore { polarity, matched }
    }
}

impl PolarityAnalyzer for LexiconAnalyzer {
    fn polarity(&self, text: &str) -> f64 {
        self.analyze(text).polarity
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}
