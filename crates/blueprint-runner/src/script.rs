use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use blueprint_engine::InputEvent;

/// A scripted key hold: `KEY`, `KEY@START` or `KEY@START-END` (ticks, inclusive).
///
/// A bare key is held for the whole run; `KEY@START` taps it for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyScript {
    pub key: String,
    pub start: u64,
    /// Last tick the key is held. `None` holds it forever.
    pub end: Option<u64>,
}

impl KeyScript {
    /// Events to push before running `tick`.
    pub fn events_at(&self, tick: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if tick == self.start {
            events.push(InputEvent::KeyDown {
                key: self.key.clone(),
            });
        }
        if self.end.is_some_and(|end| end.checked_add(1) == Some(tick)) {
            events.push(InputEvent::KeyUp {
                key: self.key.clone(),
            });
        }
        events
    }
}

impl FromStr for KeyScript {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, timing) = match s.split_once('@') {
            Some((key, timing)) => (key, Some(timing)),
            None => (s, None),
        };
        if key.trim().is_empty() {
            bail!("missing key in '{s}'");
        }
        let tick = |raw: &str| {
            raw.trim()
                .parse::<u64>()
                .with_context(|| format!("bad tick '{raw}' in '{s}'"))
        };
        let (start, end) = match timing {
            None => (0, None),
            Some(timing) => match timing.split_once('-') {
                Some((start, end)) => (tick(start)?, Some(tick(end)?)),
                None => {
                    let start = tick(timing)?;
                    (start, Some(start))
                }
            },
        };
        if end.is_some_and(|end| end < start) {
            return Err(anyhow!("'{s}' ends before it starts"));
        }
        Ok(Self {
            key: key.trim().to_string(),
            start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_forms() {
        let held: KeyScript = "RIGHT".parse().unwrap();
        assert_eq!((held.start, held.end), (0, None));

        let tap: KeyScript = "space@30".parse().unwrap();
        assert_eq!((tap.key.as_str(), tap.start, tap.end), ("space", 30, Some(30)));

        let range: KeyScript = "LEFT@5-20".parse().unwrap();
        assert_eq!((range.start, range.end), (5, Some(20)));
    }

    #[test]
    fn rejects_malformed() {
        assert!("@4".parse::<KeyScript>().is_err());
        assert!("A@x".parse::<KeyScript>().is_err());
        assert!("A@9-3".parse::<KeyScript>().is_err());
    }

    #[test]
    fn tap_presses_then_releases() {
        let tap: KeyScript = "W@2".parse().unwrap();
        assert!(tap.events_at(1).is_empty());
        assert_eq!(tap.events_at(2), vec![InputEvent::KeyDown { key: "W".into() }]);
        assert_eq!(tap.events_at(3), vec![InputEvent::KeyUp { key: "W".into() }]);
    }

    #[test]
    fn hold_until_last_tick_never_releases() {
        let script: KeyScript = format!("A@0-{}", u64::MAX).parse().unwrap();
        assert_eq!(script.end, Some(u64::MAX));
        assert!(script.events_at(u64::MAX).is_empty());
        assert!(script.events_at(1).is_empty());
    }
}
