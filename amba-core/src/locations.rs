use crate::model::Location;

/// Cities fetched together for the regional overview.
pub const NAMED_LOCATIONS: [Location; 8] = [
    Location { name: "Lagos", latitude: 6.5244, longitude: 3.3792 },
    Location { name: "Nairobi", latitude: -1.2921, longitude: 36.8219 },
    Location { name: "Cairo", latitude: 30.0444, longitude: 31.2357 },
    Location { name: "Cape Town", latitude: -33.9249, longitude: 18.4241 },
    Location { name: "Accra", latitude: 5.6037, longitude: -0.187 },
    Location { name: "Addis Ababa", latitude: 9.032, longitude: 38.7469 },
    Location { name: "Casablanca", latitude: 33.5731, longitude: -7.5898 },
    Location { name: "Tunis", latitude: 36.8065, longitude: 10.1815 },
];

/// Days of history requested per location in a batch.
pub const BATCH_WINDOW_DAYS: u32 = 7;
