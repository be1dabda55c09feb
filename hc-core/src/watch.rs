//! Matching of new requests against saved watches.

use crate::entities::*;

/// Maximum distance between the locations of a watch and a request.
pub const MAX_MATCHING_DISTANCE_KM: f64 = 80.0;

fn locations_match(watched: &Location, location: &Location) -> bool {
    if let (Some(p1), Some(p2)) = (watched.map_point(), location.map_point()) {
        return MapPoint::distance(p1, p2) <= Distance::from_km(MAX_MATCHING_DISTANCE_KM);
    }
    // Without coordinates only the names can be compared
    let same = |a: &Option<String>, b: &Option<String>| match (a, b) {
        (Some(a), Some(b)) => a.trim().eq_ignore_ascii_case(b.trim()),
        _ => false,
    };
    same(&watched.city, &location.city)
        && (watched.country.is_none() || same(&watched.country, &location.country))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Every criterion that is set must match.
pub fn watch_matches(watch: &Watch, request: &Request) -> bool {
    if !watch.has_criteria() {
        return false;
    }
    if let Some(destination) = &watch.destination {
        if !locations_match(destination, &request.destination) {
            return false;
        }
    }
    if let Some(origin) = &watch.origin {
        match &request.origin {
            Some(request_origin) if locations_match(origin, request_origin) => {}
            _ => return false,
        }
    }
    if let Some(meeting_id) = &watch.meeting_id {
        if request.meeting_id.as_ref() != Some(meeting_id) {
            return false;
        }
    }
    if let Some(text) = watch.search_text.as_deref().map(str::trim) {
        if !text.is_empty() {
            let in_title = contains_ignore_case(&request.title, text);
            let in_description = request
                .description
                .as_deref()
                .is_some_and(|d| contains_ignore_case(d, text));
            if !in_title && !in_description {
                return false;
            }
        }
    }
    if let Some(size_floor) = watch.size_floor {
        if request.size < size_floor {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use hc_entities::builders::*;

    fn stuttgart() -> Location {
        Location::build().city("Stuttgart").pos(48.7755, 9.1827).finish()
    }

    fn mannheim() -> Location {
        Location::build().city("Mannheim").pos(49.4836, 8.4630).finish()
    }

    fn heilbronn() -> Location {
        Location::build().city("Heilbronn").pos(49.1427, 9.2109).finish()
    }

    #[test]
    fn destination_within_80_km() {
        let watch = Watch::build().destination(stuttgart()).finish();
        let near = Request::build().destination(heilbronn()).finish();
        let far = Request::build().destination(mannheim()).finish();
        assert!(watch_matches(&watch, &near));
        assert!(!watch_matches(&watch, &far));
    }

    #[test]
    fn origin_must_be_present_if_watched() {
        let watch = Watch::build().origin(stuttgart()).finish();
        let without_origin = Request::build().finish();
        let with_origin = Request::build().origin(Some(stuttgart())).finish();
        assert!(!watch_matches(&watch, &without_origin));
        assert!(watch_matches(&watch, &with_origin));
    }

    #[test]
    fn locations_without_coordinates_match_by_name() {
        let watch = Watch::build()
            .destination(Location::build().city("seoul").finish())
            .finish();
        let request = Request::build()
            .destination(Location::build().city("Seoul").country("KR").finish())
            .finish();
        assert!(watch_matches(&watch, &request));
    }

    #[test]
    fn search_text_is_case_insensitive() {
        let watch = Watch::build().search_text("Wheelchair").finish();
        let in_title = Request::build().title("Spare WHEELCHAIR parts").finish();
        let in_description = Request::build()
            .title("Parts")
            .description("for a wheelchair")
            .finish();
        let nowhere = Request::build().title("Books").finish();
        assert!(watch_matches(&watch, &in_title));
        assert!(watch_matches(&watch, &in_description));
        assert!(!watch_matches(&watch, &nowhere));
    }

    #[test]
    fn size_floor() {
        let watch = Watch::build().size_floor(RequestSize::Small).finish();
        for (size, expected) in [
            (RequestSize::Tiny, false),
            (RequestSize::Small, true),
            (RequestSize::Medium, true),
        ] {
            let request = Request::build().size(size).finish();
            assert_eq!(watch_matches(&watch, &request), expected);
        }
    }

    #[test]
    fn meeting() {
        let meeting_id = Id::new();
        let watch = Watch::build().meeting(meeting_id).finish();
        let request = Request::build().meeting(Some(meeting_id)).finish();
        assert!(watch_matches(&watch, &request));
        let request = Request::build().meeting(None).finish();
        assert!(!watch_matches(&watch, &request));
    }

    #[test]
    fn all_criteria_must_match() {
        let watch = Watch::build()
            .destination(stuttgart())
            .size_floor(RequestSize::Large)
            .finish();
        let request = Request::build()
            .destination(stuttgart())
            .size(RequestSize::Medium)
            .finish();
        assert!(!watch_matches(&watch, &request));
    }

    #[test]
    fn watch_without_criteria_never_matches() {
        let watch = Watch::build().finish();
        assert!(!watch_matches(&watch, &Request::build().finish()));
    }
}
