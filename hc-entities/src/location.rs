use crate::geo::MapPoint;

/// A place given as-is by the user, no geocoding involved.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Location {
    pub description : Option<String>,
    pub country     : Option<String>,
    pub state       : Option<String>,
    pub county      : Option<String>,
    pub city        : Option<String>,
    pub borough     : Option<String>,
    pub latitude    : Option<f64>,
    pub longitude   : Option<f64>,
}

impl Location {
    pub fn map_point(&self) -> Option<MapPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => MapPoint::try_from_lat_lng_deg(lat, lng),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
