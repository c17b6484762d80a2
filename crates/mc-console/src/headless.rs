//! Headless mode: mount panels without a terminal and print one JSON object
//! per store tick until every store has ticked the requested number of times.

use std::collections::BTreeMap;
use std::io::Write;
use std::str::FromStr;
use std::time::Duration;

use mc_panels::{PanelKind, PanelState, UnknownPanel};
use mc_sim::MIN_INTERVAL;

use crate::host::{PanelHost, PanelStore};

/// Which panels to mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    One(PanelKind),
    All,
}

impl Selection {
    pub fn kinds(&self) -> Vec<PanelKind> {
        match self {
            Selection::One(kind) => vec![*kind],
            Selection::All => PanelKind::ALL.to_vec(),
        }
    }
}

impl FromStr for Selection {
    type Err = UnknownPanel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::One)
        }
    }
}

/// `{"panel": .., "state": .., "tick": n}`
pub fn snapshot_json(
    state: &PanelState,
    tick: u64,
) -> Result<serde_json::Value, serde_json::Error> {
    let mut value = serde_json::to_value(state)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("tick".into(), tick.into());
    }
    Ok(value)
}

/// Shortest store interval divided by four, so no tick is skipped between polls.
fn poll_period(stores: &BTreeMap<PanelKind, PanelStore>) -> Duration {
    stores
        .values()
        .map(|s| s.interval() / 4)
        .min()
        .unwrap_or(MIN_INTERVAL)
        .max(MIN_INTERVAL)
}

/// Print `ticks` snapshots per selected panel to `out`.
///
/// A store fault stops every store and is returned as the error.
pub async fn run_headless<W: Write>(
    host: &mut PanelHost,
    selection: Selection,
    ticks: u64,
    out: &mut W,
) -> Result<(), anyhow::Error> {
    let stores: BTreeMap<PanelKind, PanelStore> =
        selection.kinds().into_iter().map(|k| (k, host.mount(k))).collect();
    let mut printed: BTreeMap<PanelKind, u64> = stores.keys().map(|k| (*k, 0)).collect();
    let poll = poll_period(&stores);

    tracing::info!(
        panels = stores.len(),
        ticks,
        poll_ms = poll.as_millis() as u64,
        "Headless run started"
    );

    let result = loop {
        if printed.values().all(|n| *n >= ticks) {
            break Ok(());
        }

        tokio::select! {
            fault = host.next_fault() => {
                if let Some(fault) = fault {
                    tracing::error!(
                        store = %fault.store,
                        ticks = fault.ticks,
                        error = %fault.error,
                        "Store fault"
                    );
                    break Err(anyhow::anyhow!("{fault}"));
                }
            }
            _ = tokio::time::sleep(poll) => {}
        }

        for (kind, store) in &stores {
            let seen = store.ticks();
            let done = printed.entry(*kind).or_insert(0);
            if seen > *done && *done < ticks {
                let state = store.current().await;
                let line = serde_json::to_string(&snapshot_json(&state, seen)?)?;
                writeln!(out, "{line}")?;
                *done = seen;
            }
        }
        out.flush()?;
    };

    for store in stores.values() {
        store.stop();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_parses_all_and_ids() {
        assert_eq!("all".parse::<Selection>(), Ok(Selection::All));
        assert_eq!("ALL".parse::<Selection>(), Ok(Selection::All));
        assert_eq!("comms".parse::<Selection>(), Ok(Selection::One(PanelKind::Comms)));
        assert!("nope".parse::<Selection>().is_err());
    }

    #[test]
    fn snapshot_carries_tick() {
        let value = snapshot_json(&PanelState::seed(PanelKind::Learning), 4).unwrap();
        assert_eq!(value["panel"], "learning");
        assert_eq!(value["tick"], 4);
    }
}
