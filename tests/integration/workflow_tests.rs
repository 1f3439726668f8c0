//! End-to-end job workflow: pick a project, create jobs, submit, read results.

use mat3ra_api_client::{AuthContext, BandGapType, JobEndpoint};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer};

use crate::common::{api_path, client_for, success};

#[tokio::test]
async fn test_create_submit_and_read_band_gap() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api_path("projects")))
        .respond_with(success(json!([{"_id": "p1", "isDefault": true}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(api_path("jobs/create")))
        .and(body_partial_json(json!({
            "name": "Band gap Si",
            "_project": {"_id": "p1"},
            "workflow": {"_id": "w1"},
            "_material": {"_id": "m1"},
            "owner": {"_id": "acc"}
        })))
        .respond_with(success(json!({"_id": "j1", "status": "pre-submission"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(api_path("jobs/j1/submit")))
        .respond_with(success(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("properties")))
        .respond_with(success(json!([{
            "source": {"info": {"jobId": "j1", "unitId": "pw-bands"}},
            "data": {
                "name": "band_gaps",
                "values": [
                    {"type": "direct", "value": 2.5},
                    {"type": "indirect", "value": 0.6}
                ]
            }
        }])))
        .mount(&server)
        .await;

    let client = client_for(&server, AuthContext::legacy("acc", "tok")).unwrap();
    let owner = client.account().id().await.unwrap();
    let project = client.default_project(&owner).await.unwrap();
    let project_id = project["_id"].as_str().unwrap();

    let materials = vec![json!({"_id": "m1", "formula": "Si"}).as_object().cloned().unwrap()];
    let compute = JobEndpoint::get_compute("cluster-001.mat3ra.com");
    let jobs = client
        .jobs()
        .create_by_ids(&materials, "w1", project_id, "Band gap", Some(owner.as_str()), Some(compute))
        .await
        .unwrap();
    assert_eq!(jobs.len(), 1);

    let job_id = jobs[0]["_id"].as_str().unwrap();
    client.jobs().submit(job_id).await.unwrap();

    let indirect = client
        .properties()
        .get_band_gap_by_type(job_id, "pw-bands", BandGapType::Indirect)
        .await
        .unwrap();
    assert_eq!(indirect, json!(0.6));

    let units = client.properties().list_for_job(job_id).await.unwrap();
    assert_eq!(units[0].properties, vec!["band_gaps".to_string()]);
}
