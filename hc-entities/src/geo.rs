use std::fmt;

// The Earth's mean radius in meters.
const MEAN_EARTH_RADIUS: f64 = 6_371_000.0;

/// Distance in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Distance(pub f64);

impl Distance {
    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub fn from_km(km: f64) -> Self {
        Self(km * 1000.0)
    }

    pub const fn to_meters(self) -> f64 {
        self.0
    }

    pub fn is_valid(self) -> bool {
        self.0 >= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapPoint {
    lat: f64,
    lng: f64,
}

impl MapPoint {
    pub fn try_from_lat_lng_deg(lat: f64, lng: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Some(Self { lat, lng })
        } else {
            None
        }
    }

    pub const fn lat(self) -> f64 {
        self.lat
    }

    pub const fn lng(self) -> f64 {
        self.lng
    }

    /// Great-circle distance (haversine).
    pub fn distance(p1: MapPoint, p2: MapPoint) -> Distance {
        let lat1 = p1.lat.to_radians();
        let lat2 = p2.lat.to_radians();
        let dlat = (p2.lat - p1.lat).to_radians();
        let dlng = (p2.lng - p1.lng).to_radians();

        let a = (dlat / 2.0).sin() * (dlat / 2.0).sin()
            + lat1.cos() * lat2.cos() * (dlng / 2.0).sin() * (dlng / 2.0).sin();
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        Distance(MEAN_EARTH_RADIUS * c)
    }
}

impl fmt::Display for MapPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_distance() {
        let p = MapPoint::try_from_lat_lng_deg(10.0, 10.0).unwrap();
        assert_eq!(MapPoint::distance(p, p).to_meters(), 0.0);
    }

    #[test]
    fn real_distance() {
        let stuttgart = MapPoint::try_from_lat_lng_deg(48.7755, 9.1827).unwrap();
        let mannheim = MapPoint::try_from_lat_lng_deg(49.4836, 8.4630).unwrap();
        let d = MapPoint::distance(stuttgart, mannheim);
        assert!(d > Distance::from_km(92.0));
        assert!(d < Distance::from_km(96.0));
        assert_eq!(d, MapPoint::distance(mannheim, stuttgart));
    }

    #[test]
    fn reject_out_of_range_coordinates() {
        assert!(MapPoint::try_from_lat_lng_deg(90.1, 0.0).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(0.0, -180.1).is_none());
        assert!(MapPoint::try_from_lat_lng_deg(f64::NAN, 0.0).is_none());
    }
}
