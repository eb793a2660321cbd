//! Supported locales and their word pools.

use crate::FakerError;
use std::fmt;
use std::str::FromStr;

/// A locale the faker knows how to produce values for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English (United States)
    #[default]
    EnUs,
    /// Italian (Italy)
    ItIt,
    /// German (Germany)
    DeDe,
    /// French (France)
    FrFr,
}

impl Locale {
    /// All supported locales.
    pub const ALL: [Locale; 4] = [Locale::EnUs, Locale::ItIt, Locale::DeDe, Locale::FrFr];

    /// Canonical `ll_CC` code.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::EnUs => "en_US",
            Locale::ItIt => "it_IT",
            Locale::DeDe => "de_DE",
            Locale::FrFr => "fr_FR",
        }
    }

    pub(crate) fn data(&self) -> &'static LocaleData {
        match self {
            Locale::EnUs => &EN_US,
            Locale::ItIt => &IT_IT,
            Locale::DeDe => &DE_DE,
            Locale::FrFr => &FR_FR,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = FakerError;

    /// Accepts `it_IT`, `it-IT` and bare language codes such as `it`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(FakerError::UnsupportedLocale(s.to_string()));
        }
        Locale::ALL
            .into_iter()
            .find(|locale| {
                let code = locale.code().to_ascii_lowercase();
                code == normalized || code.split('_').next() == Some(normalized.as_str())
            })
            .ok_or_else(|| FakerError::UnsupportedLocale(s.to_string()))
    }
}

/// Word pools for one locale.
pub(crate) struct LocaleData {
    pub first_names: &'static [&'static str],
    pub last_names: &'static [&'static str],
    pub cities: &'static [&'static str],
    pub free_email_domains: &'static [&'static str],
    pub tlds: &'static [&'static str],
    pub words: &'static [&'static str],
}

static EN_US: LocaleData = LocaleData {
    first_names: &[
        "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
        "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica",
    ],
    last_names: &[
        "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
        "Rodriguez", "Martinez", "Wilson", "Anderson", "Taylor", "Thomas", "Moore",
    ],
    cities: &[
        "Springfield", "Riverside", "Franklin", "Greenville", "Bristol", "Clinton", "Fairview",
        "Salem", "Madison", "Georgetown",
    ],
    free_email_domains: &["gmail.com", "yahoo.com", "hotmail.com"],
    tlds: &["com", "net", "org", "info", "biz"],
    words: &[
        "system", "network", "report", "service", "value", "process", "request", "account",
        "policy", "server", "client", "session", "update", "market", "project", "quality",
        "product", "result", "control", "history",
    ],
};

static IT_IT: LocaleData = LocaleData {
    first_names: &[
        "Giuseppe", "Maria", "Giovanni", "Anna", "Antonio", "Giulia", "Mario", "Francesca",
        "Luigi", "Chiara", "Francesco", "Sara", "Alessandro", "Elena", "Lorenzo", "Martina",
    ],
    last_names: &[
        "Rossi", "Russo", "Ferrari", "Esposito", "Bianchi", "Romano", "Colombo", "Ricci",
        "Marino", "Greco", "Bruno", "Gallo", "Conti", "De Luca", "Costa",
    ],
    cities: &[
        "Roma", "Milano", "Napoli", "Torino", "Palermo", "Genova", "Bologna", "Firenze",
        "Bolzano", "Verona",
    ],
    free_email_domains: &["libero.it", "virgilio.it", "tiscali.it", "alice.it"],
    tlds: &["it", "com", "net", "org", "eu"],
    words: &[
        "sistema", "rete", "servizio", "valore", "processo", "richiesta", "utente", "progetto",
        "risultato", "controllo", "sessione", "aggiornamento", "mercato", "qualità", "prodotto",
        "storia", "accesso", "porta", "regola", "stato",
    ],
};

static DE_DE: LocaleData = LocaleData {
    first_names: &[
        "Lukas", "Anna", "Leon", "Lena", "Finn", "Laura", "Jonas", "Julia", "Paul", "Lea",
        "Felix", "Sophie", "Maximilian", "Marie", "Elias", "Emma",
    ],
    last_names: &[
        "Müller", "Schmidt", "Schneider", "Fischer", "Weber", "Meyer", "Wagner", "Becker",
        "Schulz", "Hoffmann", "Koch", "Richter", "Klein", "Wolf", "Neumann",
    ],
    cities: &[
        "Berlin", "Hamburg", "München", "Köln", "Frankfurt", "Stuttgart", "Düsseldorf",
        "Leipzig", "Dresden", "Bremen",
    ],
    free_email_domains: &["web.de", "gmx.de", "t-online.de"],
    tlds: &["de", "com", "net", "org"],
    words: &[
        "system", "netzwerk", "bericht", "dienst", "wert", "prozess", "anfrage", "konto",
        "richtlinie", "sitzung", "aktualisierung", "markt", "projekt", "qualität", "produkt",
        "ergebnis", "kontrolle", "geschichte", "zugang", "regel",
    ],
};

static FR_FR: LocaleData = LocaleData {
    first_names: &[
        "Jean", "Marie", "Pierre", "Camille", "Louis", "Léa", "Hugo", "Chloé", "Lucas", "Manon",
        "Gabriel", "Inès", "Arthur", "Jade", "Jules", "Louise",
    ],
    last_names: &[
        "Martin", "Bernard", "Dubois", "Thomas", "Robert", "Richard", "Petit", "Durand",
        "Leroy", "Moreau", "Simon", "Laurent", "Lefebvre", "Michel", "Garcia",
    ],
    cities: &[
        "Paris", "Marseille", "Lyon", "Toulouse", "Nice", "Nantes", "Strasbourg", "Montpellier",
        "Bordeaux", "Lille",
    ],
    free_email_domains: &["orange.fr", "free.fr", "laposte.net", "sfr.fr"],
    tlds: &["fr", "com", "net", "org", "eu"],
    words: &[
        "système", "réseau", "rapport", "service", "valeur", "processus", "demande", "compte",
        "politique", "session", "mise", "marché", "projet", "qualité", "produit", "résultat",
        "contrôle", "histoire", "accès", "règle",
    ],
};
