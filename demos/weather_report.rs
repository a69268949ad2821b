use wunderground::{Feature, OutputFormat, Wunderground, WundergroundError};

#[tokio::main]
async fn main() -> Result<(), WundergroundError> {
    // Reads WUNDERGROUND_API_KEY (and optionally WUNDERGROUND_BASE_URL / WUNDERGROUND_CACHE_DIR).
    let client = Wunderground::from_env().await?;

    let conditions = client
        .weather_data()
        .features(&[Feature::Conditions])
        .query("Croatia/Zagreb")
        .call()
        .await?;
    println!("{:#?}", conditions);

    let conditions_and_tide = client
        .weather_data()
        .features(&[Feature::Conditions, Feature::Tide])
        .query("Croatia/Zagreb")
        .format(OutputFormat::Xml)
        .call()
        .await?;
    for (feature, bundle) in &conditions_and_tide {
        println!("{feature}: {}", serde_json::Value::Object(bundle.clone()));
    }

    Ok(())
}
