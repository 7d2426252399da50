use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use serde::Deserialize;
use wordchain_core::io::list_files;
use wordchain_core::model::chain::{Chain, GenerateResult};

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	seed: Option<String>,
	ignore_case: Option<bool>,
}

#[derive(Deserialize)]
struct ChainQuery {
	names: Option<String>,
}

#[derive(Deserialize)]
struct LearnParams {
	text: Option<String>,
}

struct SharedData {
	chain: Chain,
	chain_names: Vec<String>,
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a word sequence from the loaded chain.
///
/// - Without `seed`, generation starts from a random learned starter.
/// - With `seed`, generation starts from that word; `ignore_case=true`
///   relaxes the seed lookup to ASCII-case-insensitive matching.
///
/// Returns the generated sequence as a space-joined response body, or 404
/// when the seed is unknown.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	let result = match &query.seed {
		None => return HttpResponse::Ok().body(shared_data.chain.generate().join(" ")),
		Some(seed) if query.ignore_case.unwrap_or(false) => {
			shared_data.chain.generate_from_seed_ignore_case(seed)
		}
		Some(seed) => shared_data.chain.generate_from_seed(seed),
	};

	match result {
		GenerateResult::Success(words) => HttpResponse::Ok().body(words.join(" ")),
		GenerateResult::NoSuchSeed => HttpResponse::NotFound().body("No such seed"),
	}
}

/// HTTP PUT endpoint `/v1/learn`
///
/// Learns one line of text (split on whitespace) into the loaded chain.
#[put("/v1/learn")]
async fn put_learn(data: web::Data<Mutex<SharedData>>, query: web::Query<LearnParams>) -> impl Responder {
	let text = match &query.text {
		Some(s) if !s.trim().is_empty() => s,
		_ => return HttpResponse::BadRequest().body("Missing or empty text"),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	shared_data.chain.add_text(text);
	HttpResponse::Ok().body("Text learned successfully")
}

#[get("/v1/chains")]
async fn get_chains() -> impl Responder {
	match list_files(&"./data".to_owned(), "json") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".json", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list chains"),
	}
}

#[get("/v1/loaded_chains")]
async fn get_loaded_chains(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	HttpResponse::Ok().body(shared_data.chain_names.join("\n"))
}

/// HTTP PUT endpoint `/v1/load_chains`
///
/// Replaces the loaded chain with the merge of the named chain files
/// from `./data`.
#[put("/v1/load_chains")]
async fn put_chains(data: web::Data<Mutex<SharedData>>, query: web::Query<ChainQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty chain name"),
	};

	let chain_names: Vec<&str> = query_names
		.split(',')
		.map(|s| s.trim())
		.filter(|s| !s.is_empty())
		.collect();

	shared_data.chain = Chain::new();
	shared_data.chain_names.clear();
	for name in chain_names {
		let chain_path = format!("./data/{}.json", name);
		let partial_chain = match Chain::load(chain_path) {
			Ok(c) => c,
			Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load chain: {e}"))
		};
		shared_data.chain.add_chain(&partial_chain);
		shared_data.chain_names.push(name.to_owned());
	}

	HttpResponse::Ok().body("Chains loaded successfully")
}

/// Main entry point for the server.
///
/// Starts with an empty chain, wraps it in a `Mutex` for thread safety,
/// and serves the generate/learn/load endpoints with permissive CORS.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - The chain file directory (`./data`) is hardcoded and should be made
///   configurable.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	let shared_data = SharedData {
		chain: Chain::new(),
		chain_names: Vec::new(),
	};
	let shared_chain = web::Data::new(Mutex::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_chain.clone())
			.service(get_generated)
			.service(put_learn)
			.service(get_chains)
			.service(put_chains)
			.service(get_loaded_chains)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
