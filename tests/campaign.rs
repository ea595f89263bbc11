use std::time::Duration;

use awc::Client;
use campaign_space::config::Config;
use campaign_space::user::{UserId, USER_ID_HEADER};
use campaign_space::{CampaignBody, CreateCampaignBody};

const BIND_ADDRESS: &str = "127.0.0.1:8089";

fn spawn_server() {
    let config = Config {
        mongodb_uri: "mongodb://localhost:27017".into(),
        database_name: "campaign_space_test".into(),
        bind_address: BIND_ADDRESS.into(),
        seed_templates: true,
    };

    let _ = std::thread::spawn(move || {
        actix_web::rt::System::new().block_on(campaign_space::run(config))
    });
}

#[actix_rt::test]
#[ignore = "requires a running mongodb instance"]
async fn create_campaign() {
    spawn_server();

    let user_id = UserId::new();
    let body = CreateCampaignBody {
        name: "Sale".into(),
        description: "Summer sale".into(),
        start_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1),
        end_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 30),
        is_recurring: false,
        popup_id: None,
    };

    let client = Client::default();
    let mut response = None;
    for _ in 0..50 {
        match client
            .post(format!("http://{}/campaigns", BIND_ADDRESS))
            .insert_header((USER_ID_HEADER, user_id.to_string()))
            .send_json(&body)
            .await
        {
            Ok(resp) => {
                response = Some(resp);
                break;
            }
            Err(_) => actix_rt::time::sleep(Duration::from_millis(100)).await,
        }
    }

    let campaign: CampaignBody = response
        .expect("server did not start")
        .json()
        .await
        .unwrap();

    assert_eq!(campaign.name, "Sale".to_string());
    assert_eq!(campaign.user_id, user_id);
    assert!(!campaign.is_active);
}

#[actix_rt::test]
#[ignore = "requires a running mongodb instance"]
async fn update_campaign() {
    spawn_server();

    let user_id = UserId::new();
    let mut body = CreateCampaignBody {
        name: "Sale".into(),
        description: "Summer sale".into(),
        start_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 1),
        end_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 30),
        is_recurring: false,
        popup_id: None,
    };

    let client = Client::default();
    let mut response = None;
    for _ in 0..50 {
        match client
            .post(format!("http://{}/campaigns", BIND_ADDRESS))
            .insert_header((USER_ID_HEADER, user_id.to_string()))
            .send_json(&body)
            .await
        {
            Ok(resp) => {
                response = Some(resp);
                break;
            }
            Err(_) => actix_rt::time::sleep(Duration::from_millis(100)).await,
        }
    }
    let created: CampaignBody = response
        .expect("server did not start")
        .json()
        .await
        .unwrap();

    body.name = "Winter sale".into();
    let updated: CampaignBody = client
        .put(format!("http://{}/campaigns/{}", BIND_ADDRESS, created.id))
        .insert_header((USER_ID_HEADER, user_id.to_string()))
        .send_json(&body)
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Winter sale".to_string());
    assert!(updated.modified_at >= created.modified_at);
}
