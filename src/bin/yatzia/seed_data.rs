//! Seed roster: the Israeli team list and the topic communities, as
//! deployed.

use chrono::Utc;
use yatzia::model::{Community, Team};
use yatzia::team_community_id;

pub const TOP_LEAGUE: &str = "ליגת העל";
pub const NATIONAL_LEAGUE: &str = "ליגה לאומית";

/// (id, name, league)
const TEAMS: &[(&str, &str, &str)] = &[
    ("maccabi-tel-aviv", "מכבי תל אביב", TOP_LEAGUE),
    ("hapoel-tel-aviv", "הפועל תל אביב", TOP_LEAGUE),
    ("maccabi-haifa", "מכבי חיפה", TOP_LEAGUE),
    ("hapoel-beer-sheva", "הפועל באר שבע", TOP_LEAGUE),
    ("beitar-jerusalem", "בית\"ר ירושלים", TOP_LEAGUE),
    ("hapoel-jerusalem", "הפועל ירושלים", TOP_LEAGUE),
    ("maccabi-netanya", "מכבי נתניה", TOP_LEAGUE),
    ("hapoel-haifa", "הפועל חיפה", TOP_LEAGUE),
    ("bnei-sakhnin", "בני סכנין", TOP_LEAGUE),
    ("maccabi-bnei-reineh", "מכבי בני ריינה", TOP_LEAGUE),
    ("hapoel-hadera", "הפועל חדרה", TOP_LEAGUE),
    ("ashdod", "מ.ס. אשדוד", TOP_LEAGUE),
    ("maccabi-petah-tikva", "מכבי פתח תקווה", TOP_LEAGUE),
    ("hapoel-petah-tikva", "הפועל פתח תקווה", TOP_LEAGUE),
    ("hapoel-raanana", "הפועל רעננה", NATIONAL_LEAGUE),
    ("hapoel-rishon", "הפועל ראשון לציון", NATIONAL_LEAGUE),
    ("hapoel-afula", "הפועל עפולה", NATIONAL_LEAGUE),
    ("hapoel-kfar-saba", "הפועל כפר סבא", NATIONAL_LEAGUE),
    ("ironi-kiryat-shmona", "עירוני קריית שמונה", NATIONAL_LEAGUE),
    ("hapoel-nazareth", "הפועל נצרת עילית", NATIONAL_LEAGUE),
];

/// (id, name, description)
const TOPIC_COMMUNITIES: &[(&str, &str, &str)] = &[
    (
        "topic_transfers",
        "העברות ושמועות",
        "כל העברות השחקנים, השמועות והעסקאות בכדורגל הישראלי",
    ),
    (
        "topic_referees",
        "שופטים ו-VAR",
        "דיונים על שיפוט, החלטות VAR ומקרים שנויים במחלוקת",
    ),
    (
        "topic_national-team",
        "נבחרת ישראל",
        "כל מה שקשור לנבחרת ישראל - משחקים, שחקנים ומוקדמות",
    ),
    (
        "topic_nostalgia",
        "נוסטלגיה",
        "זכרונות, סיפורים והיסטוריה של הכדורגל הישראלי",
    ),
    ("topic_tactics", "טקטיקה וניתוח", "ניתוחי משחקים, טקטיקות ואסטרטגיות"),
    ("topic_fantasy", "פנטזי ליגת העל", "טיפים, דיונים וליגות פנטזי"),
];

pub fn teams() -> Vec<Team> {
    TEAMS
        .iter()
        .map(|(id, name, league)| Team {
            id: (*id).to_string(),
            name: (*name).to_string(),
            slug: (*id).to_string(),
            league: (*league).to_string(),
            logo_url: String::new(),
        })
        .collect()
}

/// One fan community per team.
pub fn team_communities() -> Vec<Community> {
    teams()
        .into_iter()
        .map(|team| Community {
            id: team_community_id(&team.id),
            name: format!("אוהדי {}", team.name),
            description: format!(
                "הקהילה הרשמית של אוהדי {}. הצטרפו לדיונים, חדשות ועדכונים!",
                team.name
            ),
            team_id: Some(team.id),
            image_url: None,
            member_count: 0,
            created_at: Utc::now(),
        })
        .collect()
}

pub fn topic_communities() -> Vec<Community> {
    TOPIC_COMMUNITIES
        .iter()
        .map(|(id, name, description)| Community {
            id: (*id).to_string(),
            name: (*name).to_string(),
            description: (*description).to_string(),
            team_id: None,
            image_url: None,
            member_count: 0,
            created_at: Utc::now(),
        })
        .collect()
}
