mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

use common::{student, TestServer};

async fn seed(client: &reqwest::Client, server: &TestServer) -> Result<()> {
    common::create_student(client, server, &student("Anuki", "Alwis", "2000-01-11", "Colombo")).await?;
    common::create_student(client, server, &student("Tim", "Thomsan", "2000-01-01", "Jaffna")).await?;
    common::create_student(client, server, &student("Anna", "Johns", "2000-05-05", "Colombo 100%")).await?;
    Ok(())
}

async fn search(client: &reqwest::Client, server: &TestServer, query: &str) -> Result<Vec<String>> {
    let res = client.get(format!("{}/users/search{}", server.base_url, query)).send().await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "search failed with {}", res.status());
    let body: Vec<Value> = res.json().await?;
    Ok(body
        .iter()
        .filter_map(|s| s["firstName"].as_str().map(str::to_string))
        .collect())
}

#[tokio::test]
async fn search_without_keywords_lists_everyone() -> Result<()> {
    let (server, _) = common::spawn_server().await?;
    let client = reqwest::Client::new();
    seed(&client, &server).await?;

    assert_eq!(search(&client, &server, "").await?, vec!["Anuki", "Tim", "Anna"]);
    assert_eq!(search(&client, &server, "?keywords=").await?.len(), 3);

    Ok(())
}

#[tokio::test]
async fn every_keyword_must_match_some_field() -> Result<()> {
    let (server, _) = common::spawn_server().await?;
    let client = reqwest::Client::new();
    seed(&client, &server).await?;

    assert_eq!(search(&client, &server, "?keywords=Anuki,Alwis").await?, vec!["Anuki"]);
    assert_eq!(search(&client, &server, "?keywords=Colombo").await?, vec!["Anuki", "Anna"]);
    assert!(search(&client, &server, "?keywords=Anuki,Jaffna").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn repeated_keyword_parameters_combine() -> Result<()> {
    let (server, _) = common::spawn_server().await?;
    let client = reqwest::Client::new();
    seed(&client, &server).await?;

    assert_eq!(search(&client, &server, "?keyword=Colombo&keyword=Johns").await?, vec!["Anna"]);
    assert_eq!(search(&client, &server, "?keywords=An&keyword=Alwis").await?, vec!["Anuki"]);

    Ok(())
}

#[tokio::test]
async fn keywords_are_case_sensitive_and_literal() -> Result<()> {
    let (server, _) = common::spawn_server().await?;
    let client = reqwest::Client::new();
    seed(&client, &server).await?;

    assert!(search(&client, &server, "?keywords=anuki").await?.is_empty());
    // %25 is a literal percent sign, not a wildcard
    assert_eq!(search(&client, &server, "?keywords=%25").await?, vec!["Anna"]);

    Ok(())
}
