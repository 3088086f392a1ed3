use crate::audits::Audit;
use crate::catalog::Named;

/// Keep items whose name equals `name` exactly; a missing or empty name keeps
/// everything.
pub fn filter_by_name<T: Named>(items: Vec<T>, name: Option<&str>) -> Vec<T> {
    match name.filter(|name| !name.is_empty()) {
        Some(name) => items.into_iter().filter(|item| item.name() == name).collect(),
        None => items,
    }
}

/// Keep train audits departing `from` and arriving at `to`; an absent or empty
/// bound matches any station.
pub fn filter_by_route(audits: Vec<Audit>, from: Option<&str>, to: Option<&str>) -> Vec<Audit> {
    audits
        .into_iter()
        .filter(|audit| {
            matches_station(audit.departure_station.as_deref(), from)
                && matches_station(audit.arrival_station.as_deref(), to)
        })
        .collect()
}

fn matches_station(actual: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted.filter(|wanted| !wanted.is_empty()) {
        Some(wanted) => actual == Some(wanted),
        None => true,
    }
}
