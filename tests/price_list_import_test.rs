// ==========================================
// 价目表导入集成测试
// ==========================================
// 测试范围:
// 1. 新增与按名称更新
// 2. 行级拒绝不中断整批
// 3. 文件级错误（缺列、文件不存在）
// 4. 写库失败时整批回滚
// ==========================================


use network_cost_estimator::importer::ImportError;
use network_cost_estimator::AppState;
use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::NamedTempFile;
use test_helpers::*;

fn write_csv(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("无法创建临时文件");
    for line in lines {
        writeln!(file, "{}", line).expect("写入失败");
    }
    file
}

#[test]
fn test_import_新增与更新() {
    println!("\n=== 测试：价目表导入 ===");
    let (_temp_file, state) = create_test_state().expect("无法创建测试环境");

    let csv = write_csv(&[
        "name,description,category,unit_cost,is_active",
        "Conference Phone,Model 8832 + Mic Kit,Phones,999.00,true",
        "Fiber Jumper,LC-LC 3m,Cabling,18.25,",
        "Bad Row,,Cabling,abc,",
        "Negative,,Cabling,-3,",
        ",missing name,Cabling,1,",
    ]);

    let report = state
        .price_list_importer
        .import_file(csv.path())
        .expect("导入失败");

    assert_eq!(report.total_rows, 5);
    assert_eq!(report.updated, 1);
    assert_eq!(report.inserted, 1);
    assert_eq!(report.rejected_count(), 3);
    assert_eq!(
        report.rejected.iter().map(|r| r.row).collect::<Vec<_>>(),
        vec![4, 5, 6]
    );

    let equipment = state.catalog_api.list_equipment().expect("查询失败");
    assert_eq!(equipment.len(), 10);

    let phone = equipment
        .iter()
        .find(|i| i.name == "Conference Phone")
        .expect("应有会议话机");
    assert_eq!(phone.unit_cost, dec!(999.00));
    assert_eq!(phone.id, "eq3", "更新应保留原 id");

    // 新价格参与估算
    let result = state
        .estimate_api
        .run_estimate(&phone_params(0, 1))
        .expect("估算失败");
    let line = result
        .one_time_items
        .iter()
        .find(|i| i.description == "Conference Phones")
        .expect("应有会议话机行");
    assert_eq!(line.extended_cost, dec!(999.00));
}

#[test]
fn test_import_写入失败_整批回滚() {
    println!("\n=== 测试：导入中途写库失败 ===");
    let (_temp_file, db_path) = create_test_db().expect("无法创建测试数据库");

    // 名为 Boom 的行写入时报错
    let conn = network_cost_estimator::db::open_sqlite_connection(&db_path).expect("无法打开数据库");
    conn.execute_batch(
        "CREATE TRIGGER reject_boom BEFORE INSERT ON cost_item WHEN NEW.name = 'Boom'
         BEGIN SELECT RAISE(ABORT, 'boom rejected'); END;",
    )
    .expect("无法创建触发器");
    drop(conn);

    let state = AppState::new(db_path).expect("无法创建应用状态");
    let before = state.catalog_api.list_equipment().expect("查询失败");

    let csv = write_csv(&[
        "name,description,category,unit_cost",
        "Conference Phone,Model 8832,Phones,999.00",
        "Fiber Jumper,LC-LC 3m,Cabling,18.25",
        "Boom,,Cabling,1",
    ]);

    let err = state.price_list_importer.import_file(csv.path()).unwrap_err();
    assert!(matches!(err, ImportError::Repository(_)), "实际: {:?}", err);

    let after = state.catalog_api.list_equipment().expect("查询失败");
    assert_eq!(after, before, "失败的导入不应留下部分写入");
}

#[test]
fn test_import_缺少必需列() {
    let (_temp_file, state) = create_test_state().expect("无法创建测试环境");
    let csv = write_csv(&["name,description,unit_cost", "A,B,1"]);

    let err = state.price_list_importer.import_file(csv.path()).unwrap_err();
    assert!(
        matches!(err, ImportError::MissingColumn(ref col) if col == "category"),
        "实际: {:?}",
        err
    );
}

#[test]
fn test_import_文件不存在() {
    let (_temp_file, state) = create_test_state().expect("无法创建测试环境");

    let err = state
        .price_list_importer
        .import_file("/nonexistent/prices.csv")
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}
