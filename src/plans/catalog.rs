//! Built-in annual work plan catalogue and file-based record lists

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use super::models::{Priority, Status, WorkPlanRecord};

/// Static part of a plan line; year, priority and status are stamped per run
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub category: &'static str,
    pub sequence_number: u32,
    pub activity_name: &'static str,
    pub related_legislation: &'static str,
}

pub const ANNUAL_WORK_PLAN_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        category: "PLANLAMA VE İYİLEŞTİRME",
        sequence_number: 1,
        activity_name: "ORTAM GÖZETĐMĐNĐN YAPILMASI, TEKĐT VE ÖNERĐ GERĐLERĐNĐN YAZILMASI",
        related_legislation: "İş Sağlığı ve Güvenliği Hizmetleri Yönetmeliği",
    },
    CatalogEntry {
        category: "PLANLAMA VE İYİLEŞTİRME",
        sequence_number: 2,
        activity_name: "ORTA BALLARIN DEREPLANMASI, BL MESI FORMLAR KONTROLÜ",
        related_legislation: "İş Güvenliği Önlemleri Hakkında Yönetmelik",
    },
    CatalogEntry {
        category: "PLANLAMA VE İYİLEŞTİRME",
        sequence_number: 3,
        activity_name: "RAMAK KALA, KAZASIZLIK UYGULAMASI KAZALARIN KAYITLARININ TUTULMASI",
        related_legislation: "İSG 485001",
    },
    CatalogEntry {
        category: "PLANLAMA VE İYİLEŞTİRME",
        sequence_number: 4,
        activity_name: "İŞ GÜVENLİĞİ UZMANLIĞI HİZMETLERİ ( ÇALIŞMA ORTAMI VE İŞLER İLE İLGİLİ TEHLİKE VE RİSKLERİN KONTROLÜ, İŞ GÜVENLİĞİ İLE İLGİLİ ÇALIŞMA SNE, VB )",
        related_legislation: "6331 Sayılı İş Sağlığı ve Güvenliği Kanunu",
    },
    CatalogEntry {
        category: "PLANLAMA VE İYİLEŞTİRME",
        sequence_number: 5,
        activity_name: "RUTIN SAHA ZİYARETLERİ (ERGONOMI KONTROLÜ, YANGIN ÖNLEYİCİ VE SÖNDÜRME SİSTEMLERİ)",
        related_legislation: "İş Sağlığı ve Güvenliği Kurulları Hakkında Yönetmelik",
    },
    CatalogEntry {
        category: "PLANLAMA VE İYİLEŞTİRME",
        sequence_number: 6,
        activity_name: "RİSK DEĞERLENDİRME Sİ",
        related_legislation: "İş Sağlığı ve Güvenliği Risk Değerlendirmesi Yönetmeliği",
    },
    CatalogEntry {
        category: "PLANLAMA VE İYİLEŞTİRME",
        sequence_number: 7,
        activity_name: "ACİL EYLEM PLANI",
        related_legislation: "Acil Durum Planları Hakkında Yönetmelik",
    },
    CatalogEntry {
        category: "PLANLAMA VE İYİLEŞTİRME",
        sequence_number: 8,
        activity_name: "PERSONEL ÖLÇÜM DOSYALARI",
        related_legislation: "6331 Sayılı İş Sağlığı ve Güvenliği Kanunu",
    },
    CatalogEntry {
        category: "PLANLAMA VE İYİLEŞTİRME",
        sequence_number: 9,
        activity_name: "İŞ GÜVENLİĞİ KURUL TOPLANTILAR",
        related_legislation: "İş Sağlığı ve Güvenliği Kurulları Hakkında Yönetmelik",
    },
    CatalogEntry {
        category: "EĞİTİM",
        sequence_number: 10,
        activity_name: "GENEL KONULAR",
        related_legislation: "Çalışanların İş Sağlığı ve Güvenliği Eğitimleri Hakkında Yönetmelik",
    },
    CatalogEntry {
        category: "EĞİTİM",
        sequence_number: 11,
        activity_name: "TEKNİK KONULAR",
        related_legislation: "Çalışanların İş Sağlığı ve Güv Eğitimleri ve Çalışanların İş Sağlığı ve Güv Eğitimleri",
    },
    CatalogEntry {
        category: "EĞİTİM",
        sequence_number: 12,
        activity_name: "SAĞLIK KONULAR",
        related_legislation: "Çalışanların İş Sağlığı ve Güv Eğitimleri ve Çalışanların İş Sağlığı ve Güv Eğitimleri",
    },
    CatalogEntry {
        category: "EĞİTİM",
        sequence_number: 13,
        activity_name: "ÖĞER KONULAR",
        related_legislation: "Çalışanların İş Sağlığı ve Güv Eğitimleri ve Çalışanların İş Sağlığı ve Güv Eğitimleri",
    },
    CatalogEntry {
        category: "EĞİTİM",
        sequence_number: 14,
        activity_name: "İLKYARDIM EĞİTİMLERİ",
        related_legislation: "İlkyardım Yönetmeliği",
    },
    CatalogEntry {
        category: "EĞİTİM",
        sequence_number: 15,
        activity_name: "YANGIN EĞİTİMİ",
        related_legislation: "Binaların Yangından Korunması Hakkında Yönetmelik",
    },
    CatalogEntry {
        category: "EĞİTİM",
        sequence_number: 16,
        activity_name: "YÖN HESITE ÇALIŞMA EĞİTİMİ",
        related_legislation: "Yüksekte İş Sağlığı İş Güvenliği Yönetmeliği",
    },
    CatalogEntry {
        category: "EĞİTİM",
        sequence_number: 17,
        activity_name: "ACİL DURUM TAHLİYE EĞİTİMİ",
        related_legislation: "Acil Durum Planları Hakkında Yönetmelik",
    },
    CatalogEntry {
        category: "SAĞLIK",
        sequence_number: 18,
        activity_name: "İŞE GİRİŞ / PERİYODİK MUAYENE FORMU EK-2",
        related_legislation: "İşyeri Hekimi ve Diğer Sağlık Personelinin Görev, Yetki, Sorumluluk ve Eğitimleri Hakkında Yönetmelik",
    },
    CatalogEntry {
        category: "SAĞLIK",
        sequence_number: 19,
        activity_name: "SAĞLIK ÖLÇÜMLERİ ( Akışır - Portör - Sağlık Tarama)",
        related_legislation: "İşyeri Hekimi ve Diğer Sağlık Personelinin Görev, Yetki, Sorumluluk ve Eğitimleri Hakkında Yönetmelik",
    },
    CatalogEntry {
        category: "SAĞLIK",
        sequence_number: 20,
        activity_name: "HIJYEN KONTROLÜ",
        related_legislation: "İşyeri Hekimi ve Diğer Sağlık Personelinin Görev, Yetki, Sorumluluk ve Eğitimleri Hakkında Yönetmelik",
    },
    CatalogEntry {
        category: "SAĞLIK",
        sequence_number: 21,
        activity_name: "YANGIN SÖNDÜRME SİSTEMLERİNİN KONTROLÜ",
        related_legislation: "Binaların Yangından Korunması Hakkında Yönetmelik",
    },
    CatalogEntry {
        category: "DESTEK VE İYİLEŞTİRME",
        sequence_number: 22,
        activity_name: "MİKROBİYOL, KALORİFER KAZANI TOPRAKLAMA KONTROLÜ",
        related_legislation: "İş Ekipmanlarının Kullanımında Sağlık ve Güvenlik Şartları Yönetmeliği",
    },
    CatalogEntry {
        category: "DESTEK VE İYİLEŞTİRME",
        sequence_number: 23,
        activity_name: "BASINÇLI KAPLAR KONTROLÜ",
        related_legislation: "İş Ekipmanlarının Kullanımında Sağlık ve Güvenlik Şartları Yönetmeliği",
    },
    CatalogEntry {
        category: "DESTEK VE İYİLEŞTİRME",
        sequence_number: 24,
        activity_name: "KALDIRMA ARAÇLARI EKIPMANLARININ KONTROLÜ",
        related_legislation: "İş Ekipmanlarının Kullanımında Sağlık ve Güvenlik Şartları Yönetmeliği",
    },
    CatalogEntry {
        category: "DESTEK VE İYİLEŞTİRME",
        sequence_number: 25,
        activity_name: "TERMAL KONFOR ÖLÇÜMLERİ",
        related_legislation: "Çalışanların Gürültü ile İlgili Risklerden Korunmalarına Dair Yönetmelik",
    },
    CatalogEntry {
        category: "DESTEK VE İYİLEŞTİRME",
        sequence_number: 26,
        activity_name: "İŞ YERİ, KORUYUCU DONANIM KONTROLÜ",
        related_legislation: "Kişisel Koruyucu Donanım Yönetmeliği",
    },
    CatalogEntry {
        category: "DESTEK VE İYİLEŞTİRME",
        sequence_number: 27,
        activity_name: "ELEKTRİK PANO VE TOPRAKLAMA KONTROLÜ",
        related_legislation: "İş Ekipmanlarının Kullanımında Sağlık ve Güvenlik Şartları Yönetmeliği",
    },
    CatalogEntry {
        category: "DESTEK VE İYİLEŞTİRME",
        sequence_number: 28,
        activity_name: "ELEKTRİK ALET EKIPMANLARININ KONTROLÜ",
        related_legislation: "İş Ekipmanlarının Kullanımında Sağlık ve Güvenlik Şartları Yönetmeliği",
    },
    CatalogEntry {
        category: "DESTEK",
        sequence_number: 29,
        activity_name: "YANGIN TATBİKATI",
        related_legislation: "İşyerinde Acil Durumlar Hakkında Yönetmelik",
    },
    CatalogEntry {
        category: "DESTEK",
        sequence_number: 30,
        activity_name: "ACİL DURUM TATBİKATI",
        related_legislation: "İşyerinde Acil Durumlar Hakkında Yönetmelik",
    },
    CatalogEntry {
        category: "DESTEK",
        sequence_number: 31,
        activity_name: "İŞ YILLIK DEĞERLENDİRME RAPORU",
        related_legislation: "İş Sağlığı ve Güvenliği Hizmetleri Yönetmeliği",
    },
];

/// Materialize the built-in catalogue for one year
pub fn builtin_records(year: i32, priority: Priority, status: Status) -> Vec<WorkPlanRecord> {
    ANNUAL_WORK_PLAN_CATALOG
        .iter()
        .map(|entry| WorkPlanRecord {
            year,
            category: entry.category.to_string(),
            sequence_number: entry.sequence_number,
            activity_name: entry.activity_name.to_string(),
            related_legislation: entry.related_legislation.to_string(),
            priority,
            status,
        })
        .collect()
}

/// Entry in a JSON record file; year always comes from the run
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileEntry {
    #[serde(default)]
    category: String,
    sequence_number: u32,
    activity_name: String,
    related_legislation: String,
    #[serde(default)]
    priority: Option<Priority>,
    #[serde(default)]
    status: Option<Status>,
}

/// Parse a JSON array of plan entries, filling priority and status from the defaults
pub fn parse_records(
    json: &str,
    year: i32,
    default_priority: Priority,
    default_status: Status,
) -> Result<Vec<WorkPlanRecord>> {
    let entries: Vec<FileEntry> =
        serde_json::from_str(json).context("Failed to parse plan records JSON")?;

    Ok(entries
        .into_iter()
        .map(|entry| WorkPlanRecord {
            year,
            category: entry.category,
            sequence_number: entry.sequence_number,
            activity_name: entry.activity_name,
            related_legislation: entry.related_legislation,
            priority: entry.priority.unwrap_or(default_priority),
            status: entry.status.unwrap_or(default_status),
        })
        .collect())
}

pub fn load_records_file(
    path: &Path,
    year: i32,
    default_priority: Priority,
    default_status: Status,
) -> Result<Vec<WorkPlanRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan records file: {:?}", path))?;
    parse_records(&content, year, default_priority, default_status)
        .with_context(|| format!("Invalid plan records file: {:?}", path))
}
