// ==========================================
// 救援站勤务排班系统 - Tauri 主入口
// ==========================================
// 技术栈: Tauri + Rust + SQLite
// 系统定位: 勤务排班与人力统计
// ==========================================

// 禁止控制台窗口 (Windows)
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(feature = "tauri-app")]
fn main() {
    use rescue_duty_roster::app::tauri_commands::*;
    use rescue_duty_roster::app::{get_default_db_path, AppState};

    // 初始化日志系统
    rescue_duty_roster::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", rescue_duty_roster::i18n::t("app.title"));
    tracing::info!("系统版本: {}", rescue_duty_roster::VERSION);
    tracing::info!("==================================================");

    // 获取数据库路径
    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    // 创建AppState
    tracing::info!("正在初始化AppState...");
    let app_state = AppState::new(db_path).expect("无法初始化AppState");

    tracing::info!("AppState初始化成功");
    tracing::info!("启动Tauri应用...");

    // 启动Tauri应用
    tauri::Builder::default()
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            // ==========================================
            // 排班相关命令 (6个)
            // ==========================================
            get_duty_roster,
            get_roster_entry,
            set_duty_roster_entry,
            assign_duty_slot,
            clear_duty_roster_range,
            list_eligible_persons_for_slot,

            // ==========================================
            // 统计相关命令 (5个)
            // ==========================================
            get_monthly_series,
            get_person_breakdown,
            get_combined_breakdown,
            get_duty_days,
            get_itw_duty_days,

            // ==========================================
            // 配置与班制相关命令 (6个)
            // ==========================================
            get_setting,
            update_setting,
            get_config_snapshot,
            list_duty_patterns,
            save_duty_patterns,
            resolve_pattern_category,

            // ==========================================
            // 主数据相关命令 (19个)
            // ==========================================
            list_personnel,
            list_apprentices,
            upsert_personnel,
            upsert_apprentice,
            delete_personnel,
            delete_apprentice,
            list_vehicles,
            upsert_vehicle,
            set_vehicle_archived,
            list_vehicle_activations,
            set_vehicle_activation,
            list_shift_types,
            upsert_shift_type,
            delete_shift_type,
            list_evaluation_modes,
            set_evaluation_mode,
            list_holidays,
            upsert_holiday,
            delete_holiday,
        ])
        .run(tauri::generate_context!())
        .expect("启动Tauri应用失败");

    tracing::info!("Tauri应用已退出");
}

#[cfg(not(feature = "tauri-app"))]
fn main() {
    println!("==================================================");
    println!("{}", rescue_duty_roster::APP_NAME);
    println!("系统版本: {}", rescue_duty_roster::VERSION);
    println!("==================================================");
    println!();
    println!("此可执行文件需要启用 tauri-app 特性");
    println!("使用: cargo run --features tauri-app");
    println!();
    println!("或者使用库模式:");
    println!("use rescue_duty_roster::app::AppState;");
}
