//! ISO 4217 currency codes and their display metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Formatting metadata for a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub code: &'static str,
    /// Symbol substituted for `$` in the template. Empty means "use the code".
    pub grapheme: &'static str,
    /// `1` is replaced by the formatted number, `$` by the grapheme.
    pub template: &'static str,
    pub decimal: &'static str,
    pub thousand: &'static str,
    /// Number of minor-unit digits (2 for cents, 0 for JPY, 3 for BHD).
    pub fraction: u32,
}

macro_rules! currencies {
    ($($code:ident => ($grapheme:expr, $template:expr, $decimal:expr, $thousand:expr, $fraction:expr)),* $(,)?) => {
        const CURRENCIES: &[CurrencyInfo] = &[
            $(CurrencyInfo {
                code: stringify!($code),
                grapheme: $grapheme,
                template: $template,
                decimal: $decimal,
                thousand: $thousand,
                fraction: $fraction,
            }),*
        ];
    };
}

currencies! {
    AUD => ("$", "$1", ".", ",", 2),
    BHD => (".\u{62f}.\u{628}", "1 $", ".", ",", 3),
    BRL => ("R$", "$1", ",", ".", 2),
    CAD => ("$", "$1", ".", ",", 2),
    CHF => ("CHF", "1 $", ".", ",", 2),
    CLP => ("$", "$1", ",", ".", 0),
    CNY => ("\u{5143}", "1 $", ".", ",", 2),
    DKK => ("kr", "1 $", ",", ".", 2),
    EUR => ("\u{20ac}", "$1", ".", ",", 2),
    GBP => ("\u{a3}", "$1", ".", ",", 2),
    INR => ("\u{20b9}", "$1", ".", ",", 2),
    JPY => ("\u{a5}", "$1", ".", ",", 0),
    KRW => ("\u{20a9}", "$1", ".", ",", 0),
    KWD => (".\u{62f}.\u{643}", "1 $", ".", ",", 3),
    MXN => ("$", "$1", ".", ",", 2),
    NOK => ("kr", "1 $", ",", " ", 2),
    NZD => ("$", "$1", ".", ",", 2),
    PLN => ("z\u{142}", "1 $", ",", " ", 2),
    SEK => ("kr", "1 $", ",", " ", 2),
    USD => ("$", "$1", ".", ",", 2),
    ZAR => ("R", "$1", ".", " ", 2),
}

/// Metadata used for codes missing from the table.
const FALLBACK: CurrencyInfo = CurrencyInfo {
    code: "",
    grapheme: "",
    template: "1 $",
    decimal: ".",
    thousand: ",",
    fraction: 2,
};

impl CurrencyInfo {
    /// Looks up a currency by its (uppercase) ISO code.
    pub fn lookup(code: &str) -> Option<&'static CurrencyInfo> {
        CURRENCIES.iter().find(|c| c.code == code)
    }

    /// All currencies with known metadata.
    pub fn all() -> &'static [CurrencyInfo] {
        CURRENCIES
    }
}

/// ISO 4217 currency code.
///
/// Codes are normalised to uppercase. Any code is accepted; codes without
/// metadata format with two fraction digits and the code as symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().to_uppercase())
    }

    pub fn code(&self) -> &str {
        &self.0
    }

    /// True when the code is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Returns the formatting metadata, falling back to two fraction digits.
    pub fn info(&self) -> &'static CurrencyInfo {
        CurrencyInfo::lookup(&self.0).unwrap_or(&FALLBACK)
    }

    /// Returns the number of minor-unit digits.
    pub fn fraction_digits(&self) -> u32 {
        self.info().fraction
    }

    /// Returns the symbol used when formatting amounts.
    pub fn symbol(&self) -> &str {
        match self.info().grapheme {
            "" => &self.0,
            grapheme => grapheme,
        }
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
