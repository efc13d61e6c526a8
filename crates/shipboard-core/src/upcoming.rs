use crate::release::Release;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Ids of the releases holding the soonest undecided target date among
/// `candidates`.
///
/// A candidate is undecided when it has no manual override and its target
/// date is today or later. Every candidate sharing the minimum date is
/// returned, so ties all count as next. Releases whose date is missing or
/// does not parse are skipped here; classification reports them.
///
/// The caller chooses the group (one project, one tenant) and excludes
/// archived releases if it wants to.
pub fn soonest_upcoming<'a, I>(candidates: I, today: NaiveDate) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a Release>,
{
    let mut soonest: Option<NaiveDate> = None;
    let mut ids = BTreeSet::new();

    for release in candidates {
        if release.explicit_status().is_some() {
            continue;
        }
        let date = match release.parsed_target_date() {
            Ok(Some(date)) => date,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(release = %release.id, error = %e, "skipping release in upcoming pass");
                continue;
            }
        };
        if date < today {
            continue;
        }
        match soonest {
            Some(current) if date > current => {}
            Some(current) if date == current => {
                ids.insert(release.id.clone());
            }
            _ => {
                soonest = Some(date);
                ids.clear();
                ids.insert(release.id.clone());
            }
        }
    }

    ids
}
