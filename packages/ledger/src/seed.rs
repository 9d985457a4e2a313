//! Startup data for the ledger's static tables.

use std::collections::BTreeMap;

use campus_safety_models::{
    EmergencyContact, GeoPoint, LocationId, PatrolStatus, PatrolUnit, Product, SafetyScore,
    UserProfile,
};

/// ID of the demo user every anonymous request acts as.
pub const DEFAULT_USER_ID: &str = "user123";

/// Safety scores for the fixed campus locations, in heatmap order.
#[must_use]
pub fn safety_scores() -> Vec<SafetyScore> {
    LocationId::all()
        .iter()
        .map(|&location| {
            let (name, score, reports) = match location {
                LocationId::LibraryMain => ("Library Main Entrance", 4.2, 3),
                LocationId::HostelA => ("Girls Hostel A Block", 4.5, 1),
                LocationId::ParkingNorth => ("North Parking Lot", 2.8, 8),
                LocationId::Cafeteria => ("Main Cafeteria", 4.0, 2),
                LocationId::SportsComplex => ("Sports Complex", 3.5, 4),
                LocationId::AcademicBlockB => ("Academic Block B", 4.3, 1),
            };
            SafetyScore {
                location,
                name: name.to_string(),
                score,
                reports,
            }
        })
        .collect()
}

fn patrol(id: &str, name: &str, status: PatrolStatus, lat: f64, lng: f64) -> PatrolUnit {
    PatrolUnit {
        id: id.to_string(),
        name: name.to_string(),
        status,
        location: GeoPoint { lat, lng },
    }
}

/// Campus security units on shift.
#[must_use]
pub fn patrols() -> Vec<PatrolUnit> {
    vec![
        patrol(
            "P001",
            "Campus Security A",
            PatrolStatus::Available,
            28.6139,
            77.2295,
        ),
        patrol(
            "P002",
            "Campus Security B",
            PatrolStatus::Patrolling,
            28.6129,
            77.2305,
        ),
        patrol(
            "P003",
            "Rapid Response",
            PatrolStatus::Available,
            28.6149,
            77.2285,
        ),
    ]
}

fn contact(name: &str, phone: &str, relationship: &str) -> EmergencyContact {
    EmergencyContact {
        name: name.to_string(),
        phone: phone.to_string(),
        relationship: relationship.to_string(),
    }
}

/// Registered users keyed by user ID.
#[must_use]
pub fn users() -> BTreeMap<String, UserProfile> {
    let mut users = BTreeMap::new();
    users.insert(
        DEFAULT_USER_ID.to_string(),
        UserProfile {
            name: "Priya Sharma".to_string(),
            id: "STU2024001".to_string(),
            email: "priya.sharma@campus.edu".to_string(),
            phone: "+91-9876543210".to_string(),
            emergency_contacts: vec![
                contact("Parent", "+91-9876543211", "Parent"),
                contact("Best Friend", "+91-9876543212", "Friend"),
            ],
            medical_info: "None".to_string(),
            battery_level: 85,
        },
    );
    users
}

fn product(
    id: u32,
    name: &str,
    description: &str,
    price: u32,
    category: &str,
    features: &[&str],
    icon: &str,
) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price,
        category: category.to_string(),
        features: features.iter().map(ToString::to_string).collect(),
        icon: icon.to_string(),
    }
}

/// The safety-product shop catalog.
#[must_use]
pub fn products() -> Vec<Product> {
    vec![
        product(
            1,
            "Smart Safety Bracelet",
            "Waterproof bracelet with SOS button and GPS tracking",
            1299,
            "wearables",
            &["SOS Button", "GPS Tracking", "Waterproof", "30-day battery"],
            "heartbeat",
        ),
        product(
            2,
            "Personal Safety Alarm",
            "130dB keychain siren with built-in LED strobe",
            499,
            "personal_alarms",
            &["130dB Siren", "LED Strobe", "Pull-pin Trigger"],
            "bell",
        ),
        product(
            3,
            "Pepper Spray Keychain",
            "Compact defense spray with safety lock",
            349,
            "self_defense",
            &["Safety Lock", "3m Range", "UV Dye"],
            "shield-alt",
        ),
        product(
            4,
            "Smart Pendant",
            "Discreet pendant that shares live location with emergency contacts",
            1899,
            "wearables",
            &["Live Location", "Fall Detection", "Silent Alert"],
            "gem",
        ),
    ]
}
