// File: ./src/knowledge.rs
// Canned-answer assistant driven by an ordered keyword table.
//
// The query is lowercased and tested against RULES from top to bottom; the
// first rule whose matcher accepts wins. Order is significant: the
// multi-keyword MPASI rules must stay above the bare "mpasi" rule, and the
// Montessori branch checks for activities before falling back to the
// general principles.

/// Substring predicate over a lowercased query.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    Contains(&'static str),
    All(&'static [Matcher]),
    Any(&'static [Matcher]),
}

impl Matcher {
    pub fn matches(&self, query: &str) -> bool {
        match self {
            Matcher::Contains(needle) => query.contains(needle),
            Matcher::All(ms) => ms.iter().all(|m| m.matches(query)),
            Matcher::Any(ms) => ms.iter().any(|m| m.matches(query)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Mpasi6Months,
    Mpasi8Months,
    Mpasi12Months,
    MpasiGeneral,
    Milestones,
    MontessoriActivities,
    MontessoriPrinciples,
    Communication,
    Nutrition,
    Sleep,
}

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Answer(Topic),
    /// Nested ordered rules, with a topic for when none of them match.
    Branch(&'static [Rule], Topic),
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub when: Matcher,
    pub then: Reply,
}

use Matcher::{All, Any, Contains};

const MONTESSORI_RULES: &[Rule] = &[Rule {
    when: Any(&[Contains("aktivitas"), Contains("kegiatan"), Contains("permainan")]),
    then: Reply::Answer(Topic::MontessoriActivities),
}];

pub const RULES: &[Rule] = &[
    Rule {
        when: All(&[Contains("mpasi"), Contains("6 bulan")]),
        then: Reply::Answer(Topic::Mpasi6Months),
    },
    Rule {
        when: All(&[Contains("mpasi"), Contains("8 bulan")]),
        then: Reply::Answer(Topic::Mpasi8Months),
    },
    Rule {
        when: All(&[
            Contains("mpasi"),
            Any(&[Contains("12 bulan"), Contains("1 tahun")]),
        ]),
        then: Reply::Answer(Topic::Mpasi12Months),
    },
    Rule {
        when: Contains("mpasi"),
        then: Reply::Answer(Topic::MpasiGeneral),
    },
    Rule {
        when: Any(&[
            Contains("perkembangan"),
            Contains("milestone"),
            Contains("tumbuh kembang"),
        ]),
        then: Reply::Answer(Topic::Milestones),
    },
    Rule {
        when: Contains("montessori"),
        then: Reply::Branch(MONTESSORI_RULES, Topic::MontessoriPrinciples),
    },
    Rule {
        when: Any(&[Contains("komunikasi"), Contains("bicara")]),
        then: Reply::Answer(Topic::Communication),
    },
    Rule {
        when: Any(&[Contains("nutrisi"), Contains("gizi"), Contains("makanan sehat")]),
        then: Reply::Answer(Topic::Nutrition),
    },
    Rule {
        when: Any(&[Contains("tidur"), Contains("begadang")]),
        then: Reply::Answer(Topic::Sleep),
    },
];

fn resolve(rules: &[Rule], query: &str) -> Option<Topic> {
    rules.iter().find(|r| r.when.matches(query)).map(|r| match r.then {
        Reply::Answer(topic) => topic,
        Reply::Branch(nested, fallback) => resolve(nested, query).unwrap_or(fallback),
    })
}

/// Returns the bucket the query falls into, or `None` for the default answer.
pub fn classify(query: &str) -> Option<Topic> {
    resolve(RULES, &query.to_lowercase())
}

/// Maps free text to a canned answer. Never fails: unmatched input gets the
/// default menu of example questions.
pub fn respond(query: &str) -> &'static str {
    classify(query).map(Topic::answer).unwrap_or(DEFAULT_ANSWER)
}

impl Topic {
    pub fn answer(self) -> &'static str {
        match self {
            Topic::Mpasi6Months => MPASI_6_MONTHS,
            Topic::Mpasi8Months => MPASI_8_MONTHS,
            Topic::Mpasi12Months => MPASI_12_MONTHS,
            Topic::MpasiGeneral => MPASI_GENERAL,
            Topic::Milestones => MILESTONES,
            Topic::MontessoriActivities => MONTESSORI_ACTIVITIES,
            Topic::MontessoriPrinciples => MONTESSORI_PRINCIPLES,
            Topic::Communication => COMMUNICATION,
            Topic::Nutrition => NUTRITION,
            Topic::Sleep => SLEEP,
        }
    }
}

pub const MPASI_6_MONTHS: &str = "\
MPASI usia 6 bulan (panduan WHO):

1. Tekstur: mulai dengan bubur lumat/puree yang halus dan kental, bukan encer.
2. Frekuensi: 2-3 kali makan utama per hari, ditambah ASI sesuai keinginan bayi.
3. Porsi: mulai 2-3 sendok makan per kali makan, naikkan bertahap hingga 1/2 mangkok (125 ml).
4. Menu: menu lengkap sejak awal, yaitu karbohidrat, protein hewani (hati ayam, telur, ikan), lemak tambahan, dan sayur.
5. Prioritaskan makanan kaya zat besi karena cadangan zat besi bayi mulai menipis.

Tips: kenalkan satu bahan baru setiap 3-4 hari untuk memantau alergi, dan jangan tambahkan gula atau garam sebelum usia 1 tahun.";

pub const MPASI_8_MONTHS: &str = "\
MPASI usia 8 bulan:

1. Tekstur: naik ke makanan cincang halus atau yang bisa dilumatkan dengan gusi (nasi tim saring kasar).
2. Frekuensi: 3 kali makan utama dan 1-2 kali selingan per hari.
3. Porsi: sekitar 1/2 mangkok (125 ml) setiap kali makan.
4. Finger food: mulai kenalkan potongan lunak seukuran jari (pisang, ubi kukus, brokoli rebus) untuk melatih kemampuan menggenggam.
5. Tetap berikan protein hewani setiap hari.

Tips: biarkan anak belajar makan sendiri meski berantakan, dan hindari makanan keras berbentuk bulat kecil yang berisiko tersedak.";

pub const MPASI_12_MONTHS: &str = "\
Makan anak usia 12 bulan (1 tahun):

1. Tekstur: anak umumnya sudah bisa ikut makanan keluarga yang dipotong kecil dan tidak terlalu berbumbu.
2. Frekuensi: 3-4 kali makan utama dan 1-2 kali selingan per hari.
3. Porsi: sekitar 3/4 hingga 1 mangkok (250 ml) setiap kali makan.
4. Susu: ASI tetap dilanjutkan; susu UHT dapat dikenalkan sebagai minuman pendamping.
5. Garam dan gula boleh mulai digunakan dalam jumlah sangat sedikit.

Tips: ajak anak makan bersama keluarga di meja makan untuk membangun kebiasaan makan yang baik.";

pub const MPASI_GENERAL: &str = "\
Prinsip dasar MPASI:

1. Tepat waktu: mulai saat bayi berusia 6 bulan dan menunjukkan tanda siap (bisa duduk dengan bantuan, tertarik pada makanan).
2. Adekuat: mencukupi kebutuhan energi, protein, dan zat gizi mikro.
3. Aman dan higienis: cuci tangan, peralatan bersih, dan bahan makanan dimasak matang.
4. Responsif: perhatikan tanda lapar dan kenyang, jangan memaksa anak makan.

Tanyakan secara spesifik, misalnya \"MPASI 6 bulan\", \"MPASI 8 bulan\", atau \"MPASI 1 tahun\" untuk panduan per usia.";

pub const MILESTONES: &str = "\
Tahapan perkembangan anak (milestone) secara umum:

- 0-3 bulan: mengangkat kepala saat tengkurap, tersenyum sosial, mengikuti benda dengan mata.
- 4-6 bulan: tengkurap dan berguling, meraih mainan, tertawa, mulai mengoceh.
- 7-9 bulan: duduk tanpa bantuan, merangkak, memindahkan benda antar tangan.
- 10-12 bulan: berdiri berpegangan, mengucapkan kata pertama, melambaikan tangan.
- 12-18 bulan: berjalan sendiri, menunjuk benda yang diinginkan, minum dari gelas.
- 18-24 bulan: berlari, menyusun 2 kata, meniru pekerjaan rumah.

Setiap anak berkembang dengan kecepatannya sendiri. Konsultasikan ke dokter anak bila ada keterlambatan yang signifikan.";

pub const MONTESSORI_ACTIVITIES: &str = "\
Aktivitas Montessori sesuai usia:

0-6 bulan:
- Mobile Munari dan mobile hitam-putih untuk stimulasi visual
- Cermin di dekat matras bermain

6-12 bulan:
- Keranjang harta karun (treasure basket) berisi benda alami
- Kotak permanen objek (object permanence box)

1-2 tahun:
- Menuang air atau biji-bijian dari satu wadah ke wadah lain
- Memasukkan koin ke celengan, meronce manik besar

2-3 tahun:
- Practical life: menyapu, mencuci buah, menyiram tanaman
- Mencocokkan warna dan bentuk

Siapkan lingkungan yang rapi, alat sesuai ukuran anak, dan biarkan anak memilih aktivitasnya sendiri.";

pub const MONTESSORI_PRINCIPLES: &str = "\
Prinsip dasar metode Montessori:

1. Follow the child: amati minat anak dan ikuti kesiapannya.
2. Prepared environment: lingkungan yang tertata, aman, dan mudah dijangkau anak.
3. Kemandirian: beri kesempatan anak melakukan sendiri (\"bantu aku melakukannya sendiri\").
4. Periode sensitif: ada masa ketika anak sangat peka mempelajari keterampilan tertentu.
5. Kebebasan dalam batasan: anak bebas memilih, dengan aturan yang jelas dan konsisten.

Tanyakan \"aktivitas Montessori\" untuk daftar kegiatan sesuai usia.";

pub const COMMUNICATION: &str = "\
Tips komunikasi dengan anak:

1. Sejajarkan posisi tubuh dan tatap mata anak saat berbicara.
2. Gunakan kalimat positif: \"Jalan pelan-pelan, ya\" alih-alih \"Jangan lari!\".
3. Dengarkan secara aktif dan validasi perasaannya: \"Kamu kesal karena mainannya rusak, ya?\".
4. Beri pilihan terbatas agar anak merasa dihargai: \"Mau pakai baju merah atau biru?\".
5. Ajak bicara sejak bayi: ceritakan apa yang sedang dilakukan dan bacakan buku setiap hari.

Konsistensi dan kesabaran lebih penting daripada kata-kata yang sempurna.";

pub const NUTRITION: &str = "\
Panduan gizi seimbang untuk anak:

1. Isi Piringku: separuh piring sayur dan buah, separuh lagi makanan pokok dan lauk pauk.
2. Protein hewani setiap hari (telur, ikan, ayam, daging) untuk mencegah stunting.
3. Batasi gula, garam, dan lemak; hindari minuman manis kemasan.
4. Cukupi kebutuhan cairan dengan air putih.
5. Variasikan warna makanan agar kebutuhan vitamin dan mineral tercukupi.

Pantau pertumbuhan secara rutin di posyandu atau dokter anak.";

pub const SLEEP: &str = "\
Kebutuhan dan rutinitas tidur anak:

- 0-3 bulan: 14-17 jam per hari
- 4-12 bulan: 12-16 jam per hari termasuk tidur siang
- 1-2 tahun: 11-14 jam per hari
- 3-5 tahun: 10-13 jam per hari

Buat rutinitas sebelum tidur yang konsisten: mandi, ganti baju, membaca buku, lalu lampu diredupkan. Hindari layar setidaknya satu jam sebelum tidur.";

pub const DEFAULT_ANSWER: &str = "\
Maaf, saya belum memahami pertanyaan tersebut. Coba tanyakan salah satu topik berikut:

- \"MPASI 6 bulan\" atau \"MPASI 8 bulan\"
- \"Tahapan perkembangan anak\"
- \"Aktivitas Montessori\" atau \"Prinsip Montessori\"
- \"Tips komunikasi dengan anak\"
- \"Gizi seimbang untuk anak\"
- \"Rutinitas tidur anak\"";
