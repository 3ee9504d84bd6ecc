//! Station page parsing.
//!
//! Markup is reduced to text lines, then the status line, the address
//! block and the opening-hours block are picked out of those lines.
//! Parsing never fails; anything not found is left absent.

mod drift;
mod sections;
mod text;

use chrono::{DateTime, Utc};

use crate::models::StationRecord;

pub use drift::extract_drift;
pub use sections::{find_address, find_label_index, find_opening_hours, is_heading};
pub use text::{html_to_lines, normalized_lines};

/// Build a record from a fetched station page.
pub fn parse_station_page(source_url: &str, html: &str, fetched_at: DateTime<Utc>) -> StationRecord {
    let lines = html_to_lines(html);
    let (drift_state, message) = extract_drift(&lines);

    StationRecord::new(
        drift_state,
        message,
        find_address(&lines),
        find_opening_hours(&lines),
        source_url.to_string(),
        fetched_at,
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::models::DriftState;

    const URL: &str = "https://danskretursystem.dk/pantstation/aarhus/";

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="da">
<head><title>Pantstation Aarhus</title></head>
<body>
  <nav><a href="/">Forside</a></nav>
  <main>
    <h1>Pantstation Aarhus</h1>
    <section class="drift">
      <h2>Driftsstatus</h2>
      <p>Midlertidigt lukket. Vi forventer at åbne igen i morgen</p>
      <p>Åben. Denne linje ignoreres</p>
    </section>
    <section>
      <h3>Adresse</h3>
      <p>Butiksvej 5</p>
      <p>8000 Aarhus</p>
    </section>
    <section>
      <h3>Åbningstider</h3>
      <ul>
        <li>Mandag: 08-20</li>
        <li>Tirsdag: 08-20</li>
        <li>Helligdage følger særlige tider</li>
        <li>Lørdag: 10-16</li>
      </ul>
      <h3>Kontakt</h3>
      <p>Telefon: 70 10 20 30</p>
    </section>
  </main>
</body>
</html>"#;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_full_page() {
        let record = parse_station_page(URL, PAGE, at(8));

        assert_eq!(record.drift_state(), Some(DriftState::TemporarilyClosed));
        assert_eq!(
            record.message(),
            Some("Vi forventer at åbne igen i morgen")
        );
        assert_eq!(record.address(), Some("Butiksvej 5, 8000 Aarhus"));
        assert_eq!(
            record.opening_hours(),
            ["Mandag: 08-20", "Tirsdag: 08-20", "Lørdag: 10-16"]
        );
        assert_eq!(record.source_url(), URL);
        assert_eq!(record.fetched_at(), at(8));
    }

    #[test]
    fn test_parse_is_idempotent_apart_from_timestamp() {
        let first = parse_station_page(URL, PAGE, at(8));
        let second = parse_station_page(URL, PAGE, at(9));
        assert_ne!(first, second);

        let replayed = parse_station_page(URL, PAGE, first.fetched_at());
        assert_eq!(first, replayed);
    }

    #[test]
    fn test_parse_unrelated_page_is_empty_record() {
        let record = parse_station_page(URL, "<html><body><p>Siden findes ikke</p></body></html>", at(8));

        assert_eq!(record.drift_state(), None);
        assert_eq!(record.message(), None);
        assert_eq!(record.address(), None);
        assert!(record.opening_hours().is_empty());
    }

    #[test]
    fn test_parse_garbage_input() {
        let record = parse_station_page(URL, "<<<>>> </div></span>\nLukket.<p", at(8));
        assert_eq!(record.drift_state(), Some(DriftState::Closed));
        assert_eq!(record.message(), None);
    }
}
