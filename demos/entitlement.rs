use std::env;

use btp_entitlements::api::config::EntitlementsConfig;
use btp_entitlements::{DesiredEntitlement, Entitlements, Mutation};

fn parse_amount(arg: Option<&str>) -> Result<Option<i64>, String> {
    match arg {
        None => Ok(None),
        Some(amount) => match amount.parse::<i64>() {
            Ok(amount) => Ok(Some(amount)),
            Err(e) => Err(format!("Invalid amount {}: {}", amount, e)),
        },
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        println!("Usage: entitlement <subaccount-guid> <service> <plan> [amount]");
        return;
    }

    let config = match EntitlementsConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };
    let engine = match Entitlements::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            println!("{}", e);
            return;
        }
    };

    let mut desired = DesiredEntitlement::new(args[2].as_str(), args[3].as_str(), args[1].as_str());
    match parse_amount(args.get(4).map(String::as_str)) {
        Ok(Some(amount)) => desired = desired.with_amount(amount),
        Ok(None) => {}
        Err(e) => {
            println!("{}", e);
            return;
        }
    }

    let observation = match engine.observe(&desired, None).await {
        Ok(observation) => observation,
        Err(e) => {
            println!("Observe failed: {}", e);
            return;
        }
    };
    println!("Entitled plan: {:#?}", observation.instance.entitled_service_plan);
    println!("Assignment: {:#?}", observation.instance.assignment);

    let result = match observation.mutation() {
        Mutation::Assign => engine.create(&desired, observation.required).await,
        Mutation::Update => engine.update(&desired, observation.required).await,
        Mutation::None => {
            println!("Already up to date");
            return;
        }
    };
    match result {
        Ok(()) => println!("Set {:?}", observation.required),
        Err(e) => println!("Failed: {}", e),
    }
}
