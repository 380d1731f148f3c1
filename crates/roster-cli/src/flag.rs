//! Nationality → ISO 3166-1 alpha-2 lookup, used only to decorate rows with a
//! flag.

/// ISO code for a nationality display name, if known.
pub fn iso_code(nationality: &str) -> Option<&'static str> {
  let code = match nationality.trim() {
    "Algeria" => "DZ",
    "Argentina" => "AR",
    "Australia" => "AU",
    "Austria" => "AT",
    "Belgium" => "BE",
    "Bosnia and Herzegovina" => "BA",
    "Brazil" => "BR",
    "Burkina Faso" => "BF",
    "Cameroon" => "CM",
    "Canada" => "CA",
    "Chile" => "CL",
    "Colombia" => "CO",
    "Croatia" => "HR",
    "Czech Republic" | "Czechia" => "CZ",
    "Denmark" => "DK",
    "Ecuador" => "EC",
    "Egypt" => "EG",
    "England" | "Scotland" | "Wales" | "Northern Ireland" | "United Kingdom" => "GB",
    "Finland" => "FI",
    "France" => "FR",
    "Gabon" => "GA",
    "Germany" => "DE",
    "Ghana" => "GH",
    "Greece" => "GR",
    "Guinea" => "GN",
    "Hungary" => "HU",
    "Iceland" => "IS",
    "Iran" => "IR",
    "Ireland" | "Republic of Ireland" => "IE",
    "Israel" => "IL",
    "Italy" => "IT",
    "Ivory Coast" | "Côte d'Ivoire" => "CI",
    "Jamaica" => "JM",
    "Japan" => "JP",
    "Mali" => "ML",
    "Mexico" => "MX",
    "Morocco" => "MA",
    "Netherlands" => "NL",
    "New Zealand" => "NZ",
    "Nigeria" => "NG",
    "North Macedonia" => "MK",
    "Norway" => "NO",
    "Paraguay" => "PY",
    "Peru" => "PE",
    "Poland" => "PL",
    "Portugal" => "PT",
    "Romania" => "RO",
    "Russia" => "RU",
    "Saudi Arabia" => "SA",
    "Senegal" => "SN",
    "Serbia" => "RS",
    "Slovakia" => "SK",
    "Slovenia" => "SI",
    "South Korea" | "Korea Republic" => "KR",
    "Spain" => "ES",
    "Sweden" => "SE",
    "Switzerland" => "CH",
    "Tunisia" => "TN",
    "Turkey" | "Türkiye" => "TR",
    "Ukraine" => "UA",
    "United States" | "USA" => "US",
    "Uruguay" => "UY",
    "Venezuela" => "VE",
    _ => return None,
  };
  Some(code)
}

/// Render an alpha-2 code as a regional-indicator flag emoji.
pub fn flag_emoji(code: &str) -> Option<String> {
  if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
    return None;
  }
  code
    .bytes()
    .map(|b| char::from_u32(0x1F1E6 + u32::from(b - b'A')))
    .collect()
}

/// Flag for a nationality display name; empty when unknown.
pub fn flag_for(nationality: &str) -> String {
  iso_code(nationality)
    .and_then(flag_emoji)
    .unwrap_or_default()
}
