use poster_core::{classify_status, ShareRejection, ShareRequest, ShareResult};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn share_body_matches_platform_shape() {
    let request = ShareRequest::new(
        "2KIe48vP5c",
        "Posts on Home",
        "KVM + Libvirt Setup Guide",
        "https://mrmcmuffinz.github.io/posts/kvm_libvirt_setup_guide/",
        "https://mrmcmuffinz.github.io/images/social-card.png",
    );
    let body: serde_json::Value = serde_json::from_slice(&request.to_json().unwrap()).unwrap();

    assert_eq!(
        body,
        json!({
            "owner": "urn:li:person:2KIe48vP5c",
            "subject": "Posts on Home",
            "text": { "text": "KVM + Libvirt Setup Guide" },
            "content": {
                "contentEntities": [{
                    "entityLocation": "https://mrmcmuffinz.github.io/posts/kvm_libvirt_setup_guide/",
                    "thumbnails": [{
                        "resolvedUrl": "https://mrmcmuffinz.github.io/images/social-card.png"
                    }]
                }],
                "title": "Posts on Home"
            },
            "distribution": { "linkedInDistributionTarget": {} }
        })
    );
}

#[test]
fn any_2xx_counts_as_published() {
    for status in [200, 201, 204] {
        let result = ShareResult {
            status,
            ..ShareResult::default()
        };
        assert_eq!(classify_status(&result), Ok(()));
    }
}

#[test]
fn rejection_messages_are_actionable() {
    let unauthorized = ShareRejection::Unauthorized { status: 401 };
    assert!(unauthorized.to_string().contains("has not expired"));

    let unexpected = classify_status(&ShareResult {
        status: 400,
        body: "bad owner".into(),
        ..ShareResult::default()
    })
    .unwrap_err();
    assert_eq!(
        unexpected.to_string(),
        "failed to post on LinkedIn (status 400): bad owner"
    );
}

#[test]
fn forbidden_is_treated_like_unauthorized() {
    let result = ShareResult {
        status: 403,
        ..ShareResult::default()
    };
    assert_eq!(
        classify_status(&result),
        Err(ShareRejection::Unauthorized { status: 403 })
    );
}

#[test]
fn server_errors_keep_their_status() {
    for status in [500, 503] {
        let result = ShareResult {
            status,
            body: "upstream down".into(),
            ..ShareResult::default()
        };
        assert_eq!(
            classify_status(&result),
            Err(ShareRejection::ServerError { status })
        );
    }
}
