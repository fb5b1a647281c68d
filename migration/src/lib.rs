pub use sea_orm_migration::prelude::*;

mod m20260101_000001_create_tenancy;
mod m20260101_000002_create_academics;
mod m20260101_000003_create_finance;
mod m20260101_000004_create_communications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_tenancy::Migration),
            Box::new(m20260101_000002_create_academics::Migration),
            Box::new(m20260101_000003_create_finance::Migration),
            Box::new(m20260101_000004_create_communications::Migration),
        ]
    }
}

/// 自增主键列
pub(crate) fn pk<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// 级联外键
pub(crate) fn fk_cascade<T, C, R, K>(
    from_table: T,
    from_col: C,
    to_table: R,
    to_col: K,
) -> ForeignKeyCreateStatement
where
    T: IntoIden,
    C: IntoIden,
    R: IntoIden,
    K: IntoIden,
{
    ForeignKey::create()
        .from(from_table, from_col)
        .to(to_table, to_col)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

/// 删除后置空的外键
pub(crate) fn fk_set_null<T, C, R, K>(
    from_table: T,
    from_col: C,
    to_table: R,
    to_col: K,
) -> ForeignKeyCreateStatement
where
    T: IntoIden,
    C: IntoIden,
    R: IntoIden,
    K: IntoIden,
{
    ForeignKey::create()
        .from(from_table, from_col)
        .to(to_table, to_col)
        .on_delete(ForeignKeyAction::SetNull)
        .to_owned()
}

/// 被引用时禁止删除的外键
///
/// 使用 NO ACTION 以便在语句结束时检查，分校的级联删除可一并清理子表。
pub(crate) fn fk_restrict<T, C, R, K>(
    from_table: T,
    from_col: C,
    to_table: R,
    to_col: K,
) -> ForeignKeyCreateStatement
where
    T: IntoIden,
    C: IntoIden,
    R: IntoIden,
    K: IntoIden,
{
    ForeignKey::create()
        .from(from_table, from_col)
        .to(to_table, to_col)
        .on_delete(ForeignKeyAction::NoAction)
        .to_owned()
}
