//! Values served when the CMS cannot be reached

use chrono::{Duration, Utc};

use crate::models::{CategoryRef, MediaItem, MenuItem, NodeList, Post};

/// Header menu used when the CMS menu is unavailable
pub fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("Accueil", "/"),
        MenuItem::new("FAQ", "/faq"),
        MenuItem::new("Contact", "/contact"),
    ]
}

/// Route list used when no URI could be collected
pub fn default_uris() -> Vec<String> {
    vec!["faq".to_string(), "contact".to_string()]
}

fn demo_post(
    uri: &str,
    title: &str,
    excerpt: &str,
    days_ago: i64,
    image: MediaItem,
    category: (&str, &str),
) -> Post {
    Post {
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        uri: uri.to_string(),
        date: (Utc::now() - Duration::days(days_ago))
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string(),
        featured_image: Some(image.into()),
        categories: NodeList::from(vec![CategoryRef {
            name: category.0.to_string(),
            uri: Some(category.1.to_string()),
            slug: None,
        }]),
        ..Default::default()
    }
}

fn actualites_demo() -> Post {
    demo_post(
        "/blog/actualites-citizenlab",
        "Actualités CitizenLab Sénégal",
        "Découvrez les dernières actualités et activités de CitizenLab Sénégal...",
        0,
        MediaItem::new("/assets/images/formation1.jpg", "Formation CitizenLab"),
        ("Actualités", "/category/actualites"),
    )
}

fn participation_demo() -> Post {
    demo_post(
        "/blog/participation-citoyenne",
        "La Participation Citoyenne au Sénégal",
        "Comment encourager et développer la participation citoyenne dans notre pays...",
        1,
        MediaItem::new("/assets/images/hero.png", "Participation citoyenne"),
        ("Démocratie", "/category/democratie"),
    )
}

/// Demo posts for the latest-posts section
pub fn demo_latest_posts() -> Vec<Post> {
    vec![actualites_demo(), participation_demo()]
}

/// Demo post for the news page
pub fn demo_news_posts() -> Vec<Post> {
    vec![actualites_demo()]
}
