use std::sync::Arc;

use chrono::NaiveDate;
use stay_scout::booking::{BookingDetails, BookingNotifier};
use stay_scout::config::Config;
use stay_scout::geo::MapboxGeocoder;
use stay_scout::listings::ListingService;
use stay_scout::mail::HttpMailer;
use stay_scout::models::{Geometry, ImageRef, Listing, ListingDraft, Owner};
use stay_scout::search::{SearchError, SearchResolver};
use stay_scout::store::MemoryStore;
use tracing::{info, warn, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏠 Stay Scout - listings search & booking demo");
    info!("==============================================");
    info!("");

    let config = Config::from_env();
    let store = Arc::new(MemoryStore::with_listings(seed_listings()));

    // With a Mapbox token, run one listing through the full create path
    if let Some(token) = config.map_token.clone() {
        let geocoder = Arc::new(MapboxGeocoder::new(token)?);
        let service = ListingService::new(store.clone(), geocoder);
        let created = service
            .create(
                ListingDraft {
                    title: "Harbor House".to_string(),
                    description: "Quiet townhouse by the old harbor.".to_string(),
                    price: 180,
                    location: "Bergen".to_string(),
                    country: "Norway".to_string(),
                    category: "Townhouses".to_string(),
                },
                Owner {
                    name: "Ingrid Olsen".to_string(),
                    email: "ingrid@example.com".to_string(),
                },
                None,
            )
            .await?;
        info!("Created and geocoded listing: {}", created.title);
    } else {
        info!("MAP_TOKEN not set, skipping geocoded listing creation");
    }

    let query: String = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let query = if query.is_empty() {
        "new york".to_string()
    } else {
        query
    };

    info!("Searching listings for: {:?}", query);
    info!("");

    let resolver = SearchResolver::new(store.clone());
    let hit = match resolver.resolve(&query).await {
        Ok(hit) => hit,
        Err(SearchError::EmptyQuery) => {
            warn!("Please enter search query!");
            return Ok(());
        }
        Err(SearchError::NoMatch) => {
            warn!("No listings found based on your search!");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    info!("✅ Listings searched by {}!", hit.field.label());
    info!("");

    for (i, listing) in hit.listings.iter().enumerate() {
        println!("{}. {} ({} per night)", i + 1, listing.title, listing.price);
        println!(
            "   {} · {}, {}",
            listing.category, listing.location, listing.country
        );
        println!("   Owner: {} <{}>", listing.owner.name, listing.owner.email);
        println!();
    }

    // With mail configured, book the first hit and send both notifications
    match config.mail {
        Some(mail) => {
            let mailer = Arc::new(HttpMailer::new(mail.api_url, mail.api_key)?);
            let notifier = BookingNotifier::new(store.clone(), mailer, mail.from_address);
            let report = notifier
                .notify(hit.listings[0].id, "guest@example.com", &sample_booking())
                .await?;
            info!("Booker notification: {:?}", report.booker);
            info!("Owner notification: {:?}", report.owner);
        }
        None => info!("MAIL_API_URL/MAIL_API_KEY/MAIL_FROM not set, skipping booking demo"),
    }

    Ok(())
}

fn sample_booking() -> BookingDetails {
    BookingDetails {
        check_in: NaiveDate::from_ymd_opt(2026, 9, 12).unwrap(),
        check_out: NaiveDate::from_ymd_opt(2026, 9, 15).unwrap(),
        guests: 2,
        phone_number: "+46 70 123 45 67".to_string(),
        payment_method: "payAtHotel".to_string(),
        online_payment_option: None,
        special_requests: Some("Late check-in".to_string()),
    }
}

/// Sample listings for the demo store
fn seed_listings() -> Vec<Listing> {
    let seeds = [
        (
            "New York Loft",
            "Bright loft two blocks from the subway.",
            320,
            "New York",
            "United States",
            "Lofts",
            "Ava Thompson",
            "ava@example.com",
            (-73.9857, 40.7484),
        ),
        (
            "Old Town Apartment",
            "Top-floor flat overlooking Gamla Stan.",
            150,
            "Stockholm",
            "Sweden",
            "Apartments",
            "Erik Lund",
            "erik@example.com",
            (18.0686, 59.3293),
        ),
        (
            "Seaside Cabin",
            "Small cabin right on the water.",
            95,
            "Gotland",
            "Sweden",
            "Cabins",
            "Maja Berg",
            "maja@example.com",
            (18.2948, 57.6348),
        ),
        (
            "Alpine Chalet",
            "Ski-in chalet with a fireplace.",
            410,
            "Chamonix",
            "France",
            "Chalets",
            "Luc Moreau",
            "luc@example.com",
            (6.8694, 45.9237),
        ),
    ];

    seeds
        .into_iter()
        .map(
            |(title, description, price, location, country, category, owner, email, (lon, lat))| {
                let mut listing = Listing::from_draft(
                    ListingDraft {
                        title: title.to_string(),
                        description: description.to_string(),
                        price,
                        location: location.to_string(),
                        country: country.to_string(),
                        category: category.to_string(),
                    },
                    Owner {
                        name: owner.to_string(),
                        email: email.to_string(),
                    },
                    Some(ImageRef {
                        url: format!(
                            "https://assets.example.com/upload/{}.jpg",
                            title.to_lowercase().replace(' ', "-")
                        ),
                        filename: format!("{}.jpg", title.to_lowercase().replace(' ', "-")),
                    }),
                    None,
                );
                listing.geometry = Some(Geometry::point(lon, lat));
                listing
            },
        )
        .collect()
}
