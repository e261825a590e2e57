//! PostgreSQL-backed store.
//!
//! Tables mirror the domain records. Routes carry no foreign keys, so a
//! route may reference a city or mode that does not exist; the search layer
//! reports that as an integrity failure.

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;

use crate::domain::{
    City, CityId, ComfortScore, ModeId, NewCity, NewRoute, NewTransportMode, Route, RouteId,
    TransportMode,
};

use super::{CityDirectory, ModeDirectory, RouteRepository, StoreError};

/// Statements creating the schema, safe to run repeatedly.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS cities (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        state TEXT NOT NULL,
        latitude DOUBLE PRECISION NOT NULL,
        longitude DOUBLE PRECISION NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS transport_modes (
        id SERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        icon TEXT NOT NULL,
        color TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS routes (
        id SERIAL PRIMARY KEY,
        origin_city_id INTEGER NOT NULL,
        destination_city_id INTEGER NOT NULL,
        transport_mode_id INTEGER NOT NULL,
        provider TEXT NOT NULL,
        price INTEGER NOT NULL,
        duration INTEGER NOT NULL,
        departure_time TEXT NOT NULL,
        arrival_time TEXT NOT NULL,
        comfort_score INTEGER NOT NULL,
        amenities JSONB NOT NULL,
        description TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS routes_city_pair_idx
        ON routes (origin_city_id, destination_city_id)",
];

const CITY_COLUMNS: &str = "id, name, state, latitude, longitude";
const MODE_COLUMNS: &str = "id, name, icon, color";
const ROUTE_COLUMNS: &str = "id, origin_city_id, destination_city_id, transport_mode_id, \
     provider, price, duration, departure_time, arrival_time, comfort_score, amenities, description";

#[derive(Debug, sqlx::FromRow)]
struct CityRow {
    id: i32,
    name: String,
    state: String,
    latitude: f64,
    longitude: f64,
}

impl From<CityRow> for City {
    fn from(row: CityRow) -> Self {
        City {
            id: CityId(row.id),
            name: row.name,
            state: row.state,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ModeRow {
    id: i32,
    name: String,
    icon: String,
    color: String,
}

impl From<ModeRow> for TransportMode {
    fn from(row: ModeRow) -> Self {
        TransportMode {
            id: ModeId(row.id),
            name: row.name,
            icon: row.icon,
            color: row.color,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RouteRow {
    id: i32,
    origin_city_id: i32,
    destination_city_id: i32,
    transport_mode_id: i32,
    provider: String,
    price: i32,
    duration: i32,
    departure_time: String,
    arrival_time: String,
    comfort_score: i32,
    amenities: Json<Vec<String>>,
    description: String,
}

/// Convert a stored integer to an unsigned domain value.
fn unsigned(field: &'static str, value: i32) -> Result<u32, StoreError> {
    u32::try_from(value).map_err(|_| StoreError::OutOfRange {
        table: "routes",
        field,
        value: value.into(),
    })
}

/// Convert an unsigned domain value to a storable integer.
fn signed(field: &'static str, value: u32) -> Result<i32, StoreError> {
    i32::try_from(value).map_err(|_| StoreError::OutOfRange {
        table: "routes",
        field,
        value: value.into(),
    })
}

impl TryFrom<RouteRow> for Route {
    type Error = StoreError;

    fn try_from(row: RouteRow) -> Result<Self, Self::Error> {
        let comfort_score =
            ComfortScore::new(row.comfort_score.into()).map_err(|e| StoreError::OutOfRange {
                table: "routes",
                field: "comfort_score",
                value: e.0,
            })?;

        Ok(Route {
            id: RouteId(row.id),
            origin_city_id: CityId(row.origin_city_id),
            destination_city_id: CityId(row.destination_city_id),
            transport_mode_id: ModeId(row.transport_mode_id),
            provider: row.provider,
            price: unsigned("price", row.price)?,
            duration: unsigned("duration", row.duration)?,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            comfort_score,
            amenities: row.amenities.0,
            description: row.description,
        })
    }
}

fn into_routes(rows: Vec<RouteRow>) -> Result<Vec<Route>, StoreError> {
    rows.into_iter().map(Route::try_from).collect()
}

/// Store backed by a PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to the database at `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }

    /// Create tables and indexes if they do not exist.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Whether the reference tables hold no cities yet.
    pub async fn is_empty(&self) -> Result<bool, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cities")
            .fetch_one(&self.pool)
            .await?;
        Ok(count == 0)
    }
}

impl CityDirectory for PgStore {
    async fn list_cities(&self) -> Result<Vec<City>, StoreError> {
        let rows: Vec<CityRow> =
            sqlx::query_as(&format!("SELECT {CITY_COLUMNS} FROM cities ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(City::from).collect())
    }

    async fn city_by_id(&self, id: CityId) -> Result<Option<City>, StoreError> {
        let row: Option<CityRow> =
            sqlx::query_as(&format!("SELECT {CITY_COLUMNS} FROM cities WHERE id = $1"))
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(City::from))
    }

    async fn city_by_name(&self, name: &str) -> Result<Option<City>, StoreError> {
        let row: Option<CityRow> = sqlx::query_as(&format!(
            "SELECT {CITY_COLUMNS} FROM cities WHERE lower(name) = lower($1) ORDER BY id LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(City::from))
    }

    async fn insert_city(&self, city: NewCity) -> Result<City, StoreError> {
        let row: CityRow = sqlx::query_as(&format!(
            "INSERT INTO cities (name, state, latitude, longitude) \
             VALUES ($1, $2, $3, $4) RETURNING {CITY_COLUMNS}"
        ))
        .bind(&city.name)
        .bind(&city.state)
        .bind(city.latitude)
        .bind(city.longitude)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }
}

impl ModeDirectory for PgStore {
    async fn list_modes(&self) -> Result<Vec<TransportMode>, StoreError> {
        let rows: Vec<ModeRow> = sqlx::query_as(&format!(
            "SELECT {MODE_COLUMNS} FROM transport_modes ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(TransportMode::from).collect())
    }

    async fn mode_by_id(&self, id: ModeId) -> Result<Option<TransportMode>, StoreError> {
        let row: Option<ModeRow> = sqlx::query_as(&format!(
            "SELECT {MODE_COLUMNS} FROM transport_modes WHERE id = $1"
        ))
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(TransportMode::from))
    }

    async fn insert_mode(&self, mode: NewTransportMode) -> Result<TransportMode, StoreError> {
        let row: ModeRow = sqlx::query_as(&format!(
            "INSERT INTO transport_modes (name, icon, color) \
             VALUES ($1, $2, $3) RETURNING {MODE_COLUMNS}"
        ))
        .bind(&mode.name)
        .bind(&mode.icon)
        .bind(&mode.color)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }
}

impl RouteRepository for PgStore {
    async fn list_routes(&self) -> Result<Vec<Route>, StoreError> {
        let rows: Vec<RouteRow> =
            sqlx::query_as(&format!("SELECT {ROUTE_COLUMNS} FROM routes ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;
        into_routes(rows)
    }

    async fn route_by_id(&self, id: RouteId) -> Result<Option<Route>, StoreError> {
        let row: Option<RouteRow> =
            sqlx::query_as(&format!("SELECT {ROUTE_COLUMNS} FROM routes WHERE id = $1"))
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await?;
        row.map(Route::try_from).transpose()
    }

    async fn insert_route(&self, route: NewRoute) -> Result<Route, StoreError> {
        let row: RouteRow = sqlx::query_as(&format!(
            "INSERT INTO routes (origin_city_id, destination_city_id, transport_mode_id, \
             provider, price, duration, departure_time, arrival_time, comfort_score, \
             amenities, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {ROUTE_COLUMNS}"
        ))
        .bind(route.origin_city_id.get())
        .bind(route.destination_city_id.get())
        .bind(route.transport_mode_id.get())
        .bind(&route.provider)
        .bind(signed("price", route.price)?)
        .bind(signed("duration", route.duration)?)
        .bind(&route.departure_time)
        .bind(&route.arrival_time)
        .bind(i32::from(route.comfort_score.get()))
        .bind(Json(&route.amenities))
        .bind(&route.description)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    async fn routes_between(
        &self,
        origin: CityId,
        destination: CityId,
    ) -> Result<Vec<Route>, StoreError> {
        let rows: Vec<RouteRow> = sqlx::query_as(&format!(
            "SELECT {ROUTE_COLUMNS} FROM routes \
             WHERE origin_city_id = $1 AND destination_city_id = $2 ORDER BY id"
        ))
        .bind(origin.get())
        .bind(destination.get())
        .fetch_all(&self.pool)
        .await?;
        into_routes(rows)
    }
}
