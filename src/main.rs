use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use ride_hailing::config::environment::EnvironmentConfig;
use ride_hailing::database::{create_pool, run_migrations};
use ride_hailing::routes::create_app_router;
use ride_hailing::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚕 Ride Hailing - API de bookings");
    info!("=================================");

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        error!("❌ Error ejecutando migraciones: {}", e);
        return Err(e);
    }
    info!("✅ Migraciones aplicadas");

    // Crear router de la API
    let config = EnvironmentConfig::default();
    let port = config.port;
    let app_state = AppState::new(pool, config);
    let app = create_app_router(app_state);

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Endpoints - Auth:");
    info!("   POST /api/auth/user/register - Registrar rider");
    info!("   POST /api/auth/user/login - Login rider");
    info!("   POST /api/auth/driver/register - Registrar driver");
    info!("   POST /api/auth/driver/login - Login driver");
    info!("👤 Endpoints - Perfiles:");
    info!("   GET  /api/users/me - Perfil del rider");
    info!("   PATCH /api/users/me - Actualizar perfil del rider");
    info!("   GET  /api/drivers/me - Perfil del driver");
    info!("   PATCH /api/drivers/me - Actualizar perfil del driver");
    info!("🚗 Endpoints - Vehicles:");
    info!("   POST /api/vehicles - Registrar vehículo");
    info!("   GET  /api/vehicles - Listar vehículos del driver");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("📋 Endpoints - Bookings:");
    info!("   POST /api/bookings - Crear booking (rider)");
    info!("   GET  /api/bookings/mine - Bookings del rider");
    info!("   GET  /api/bookings/pending - Bookings PENDING (driver)");
    info!("   GET  /api/bookings/driver/mine - Bookings del driver");
    info!("   GET  /api/bookings/:id - Detalle de booking");
    info!("   POST /api/bookings/:id/accept - Aceptar booking (driver)");
    info!("   POST /api/bookings/:id/start - Iniciar carrera (driver)");
    info!("   POST /api/bookings/:id/complete - Completar carrera (driver)");
    info!("   POST /api/bookings/:id/cancel - Cancelar booking");
    info!("   POST /api/bookings/:id/rate - Calificar booking");
    info!("   PATCH /api/bookings/:id - Actualizar notas/pago");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
