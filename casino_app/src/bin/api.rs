use actix_web::{
    body::BoxBody,
    error, get,
    http::{header::ContentType, StatusCode},
    post, web, App, HttpResponse, HttpServer,
};
use casino_app::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// An enum that will handle user facing errors.
#[derive(Debug)]
enum UserError {
    InternalError,
    Game(CasinoGameError),
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserError::InternalError => write!(f, "an internal error occured"),
            UserError::Game(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for UserError {}

impl error::ResponseError for UserError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            UserError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            UserError::Game(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<CasinoGameError> for UserError {
    fn from(value: CasinoGameError) -> Self {
        UserError::Game(value)
    }
}

/// Bet input exactly as the user typed it; parsing happens in the session.
#[derive(Deserialize)]
struct BetForm {
    bet: String,
}

#[derive(Deserialize)]
struct SpinForm {
    bet: String,
    kind: String,
}

#[derive(Serialize)]
struct BalanceResponse {
    balance: u32,
}

#[derive(Serialize)]
struct TableResponse {
    balance: u32,
    phase: RoundPhase,
    table: TableView,
    message: Option<String>,
}

#[derive(Serialize)]
struct SpinResponse {
    balance: u32,
    result: SpinResult,
    pocket_message: String,
    outcome_message: String,
}

fn table_response(session: &CasinoSession, outcome: Option<RoundOutcome>) -> TableResponse {
    TableResponse {
        balance: session.balance(),
        phase: session.blackjack_phase(),
        table: session.blackjack_view(),
        message: outcome.map(|o| o.message().to_string()),
    }
}

/// A handler that reports the current bankroll balance.
#[get("/balance")]
async fn balance(
    app_session: web::Data<Mutex<CasinoSession>>,
) -> Result<HttpResponse, UserError> {
    let guard = if let Ok(g) = app_session.lock() {
        g
    } else {
        return Err(UserError::InternalError);
    };
    Ok(HttpResponse::Ok().json(BalanceResponse {
        balance: guard.balance(),
    }))
}

/// A handler that starts a blackjack round with the posted bet.
#[post("/blackjack/deal")]
async fn blackjack_deal(
    form: web::Json<BetForm>,
    app_session: web::Data<Mutex<CasinoSession>>,
) -> Result<HttpResponse, UserError> {
    let mut guard = if let Ok(g) = app_session.lock() {
        g
    } else {
        return Err(UserError::InternalError);
    };
    let outcome = guard.deal(&form.bet)?;
    Ok(HttpResponse::Ok().json(table_response(&guard, outcome)))
}

/// A handler that draws one more card for the player.
#[post("/blackjack/hit")]
async fn blackjack_hit(
    app_session: web::Data<Mutex<CasinoSession>>,
) -> Result<HttpResponse, UserError> {
    let mut guard = if let Ok(g) = app_session.lock() {
        g
    } else {
        return Err(UserError::InternalError);
    };
    let outcome = guard.hit()?;
    Ok(HttpResponse::Ok().json(table_response(&guard, outcome)))
}

/// A handler that ends the player's turn and plays the dealer out. The
/// dealer loop blocks on its per-draw pacing, so it runs on the blocking
/// thread pool instead of pinning an executor worker for the whole loop.
#[post("/blackjack/stay")]
async fn blackjack_stay(
    app_session: web::Data<Mutex<CasinoSession>>,
) -> Result<HttpResponse, UserError> {
    let session = app_session.clone();
    let response = web::block(move || {
        let mut guard = session.lock().map_err(|_| UserError::InternalError)?;
        let outcome = guard.stay(|_| {}).map_err(UserError::Game)?;
        Ok::<TableResponse, UserError>(table_response(&guard, Some(outcome)))
    })
    .await
    .map_err(|_| UserError::InternalError)??;
    Ok(HttpResponse::Ok().json(response))
}

/// A handler that runs one roulette spin. The spin blocks on the wheel's
/// display delay, so it also runs on the blocking thread pool; the session
/// mutex keeps a second spin from racing a pending settlement.
#[post("/roulette/spin")]
async fn roulette_spin(
    form: web::Json<SpinForm>,
    app_session: web::Data<Mutex<CasinoSession>>,
) -> Result<HttpResponse, UserError> {
    let session = app_session.clone();
    let form = form.into_inner();
    let response = web::block(move || {
        let mut guard = session.lock().map_err(|_| UserError::InternalError)?;
        let result = guard.spin(&form.bet, &form.kind).map_err(UserError::Game)?;
        Ok::<SpinResponse, UserError>(SpinResponse {
            balance: guard.balance(),
            pocket_message: result.pocket_message(),
            outcome_message: result.outcome_message(),
            result,
        })
    })
    .await
    .map_err(|_| UserError::InternalError)??;
    Ok(HttpResponse::Ok().json(response))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let address = "127.0.0.1";
    let port = 8080;
    println!("Listening at {}:{}...", address, port);

    let store = FileBalanceStore::new("casino_balance.json");
    let app_session: web::Data<Mutex<CasinoSession>> =
        web::Data::new(Mutex::new(CasinoSession::new(Box::new(store), false)));

    HttpServer::new(move || {
        App::new()
            .app_data(app_session.clone())
            .service(balance)
            .service(blackjack_deal)
            .service(blackjack_hit)
            .service(blackjack_stay)
            .service(roulette_spin)
    })
    .bind((address, port))?
    .run()
    .await
}
