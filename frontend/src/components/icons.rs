//! 线条图标（24x24，stroke 绘制）
//!
//! 用法：`<Trash2 attr:class="h-4 w-4" />`

use leptos::prelude::*;

macro_rules! icon {
    ($name:ident, $($path:tt),+ $(,)?) => {
        #[component]
        pub fn $name() -> impl IntoView {
            view! {
                <svg
                    xmlns="http://www.w3.org/2000/svg"
                    viewBox="0 0 24 24"
                    fill="none"
                    stroke="currentColor"
                    stroke-width="2"
                    stroke-linecap="round"
                    stroke-linejoin="round"
                >
                    $(<path d=$path />)+
                </svg>
            }
        }
    };
}

icon!(
    Activity,
    "M22 12h-4l-3 9L9 3l-3 9H2",
);
icon!(
    Award,
    "M12 2a6 6 0 1 0 0 12a6 6 0 1 0 0-12Z",
    "M15.48 12.89 17 22l-5-3-5 3 1.52-9.11",
);
icon!(
    BarChart3,
    "M3 3v18h18",
    "M18 17V9",
    "M13 17V5",
    "M8 17v-3",
);
icon!(
    Bell,
    "M6 8a6 6 0 0 1 12 0c0 7 3 9 3 9H3s3-2 3-9",
    "M10.3 21a1.94 1.94 0 0 0 3.4 0",
);
icon!(
    Briefcase,
    "M16 20V4a2 2 0 0 0-2-2h-4a2 2 0 0 0-2 2v16",
    "M4 6h16a2 2 0 0 1 2 2v10a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2z",
);
icon!(
    Building2,
    "M6 22V4a2 2 0 0 1 2-2h8a2 2 0 0 1 2 2v18Z",
    "M6 12H4a2 2 0 0 0-2 2v6a2 2 0 0 0 2 2h2",
    "M18 9h2a2 2 0 0 1 2 2v9a2 2 0 0 1-2 2h-2",
    "M10 6h4",
    "M10 10h4",
    "M10 14h4",
    "M10 18h4",
);
icon!(
    Calendar,
    "M8 2v4",
    "M16 2v4",
    "M5 4h14a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2z",
    "M3 10h18",
);
icon!(
    Clock,
    "M2 12a10 10 0 1 0 20 0a10 10 0 1 0-20 0",
    "M12 6v6l4 2",
);
icon!(
    Crown,
    "m2 4 3 12h14l3-12-6 7-4-7-4 7-6-7zm3 16h14",
);
icon!(
    ExternalLink,
    "M15 3h6v6",
    "M10 14 21 3",
    "M18 13v6a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2h6",
);
icon!(
    Eye,
    "M2 12s3-7 10-7 10 7 10 7-3 7-10 7-10-7-10-7Z",
    "M12 9a3 3 0 1 0 0 6a3 3 0 1 0 0-6Z",
);
icon!(
    EyeOff,
    "M9.88 9.88a3 3 0 1 0 4.24 4.24",
    "M10.73 5.08A10.43 10.43 0 0 1 12 5c7 0 10 7 10 7a13.16 13.16 0 0 1-1.67 2.68",
    "M6.61 6.61A13.53 13.53 0 0 0 2 12s3 7 10 7a9.74 9.74 0 0 0 5.39-1.61",
    "M2 2l20 20",
);
icon!(
    Flame,
    "M8.5 14.5A2.5 2.5 0 0 0 11 12c0-1.38-.5-2-1-3-1.07-2.14-.22-4.05 2-6 .5 2.5 2 4.9 4 6.5 2 1.6 3 3.5 3 5.5a7 7 0 1 1-14 0c0-1.15.43-2.29 1-3a2.5 2.5 0 0 0 2.5 2.5z",
);
icon!(
    Inbox,
    "M22 12h-6l-2 3h-4l-2-3H2",
    "M5.45 5.11 2 12v6a2 2 0 0 0 2 2h16a2 2 0 0 0 2-2v-6l-3.45-6.89A2 2 0 0 0 16.76 4H7.24a2 2 0 0 0-1.79 1.11z",
);
icon!(
    LayoutDashboard,
    "M3 3h7v9H3z",
    "M14 3h7v5h-7z",
    "M14 12h7v9h-7z",
    "M3 16h7v5H3z",
);
icon!(
    LogOut,
    "M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4",
    "M16 17l5-5-5-5",
    "M21 12H9",
);
icon!(
    Mail,
    "M4 4h16a2 2 0 0 1 2 2v12a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2z",
    "m22 7-10 5L2 7",
);
icon!(
    MapPin,
    "M20 10c0 6-8 12-8 12s-8-6-8-12a8 8 0 0 1 16 0Z",
    "M9 10a3 3 0 1 0 6 0a3 3 0 1 0-6 0",
);
icon!(
    Medal,
    "M7.21 15 2.66 7.14a2 2 0 0 1 .13-2.2L4.4 2.8A2 2 0 0 1 6 2h12a2 2 0 0 1 1.6.8l1.6 2.14a2 2 0 0 1 .14 2.2L16.79 15",
    "M11 12 5.12 2.2",
    "M13 12l5.88-9.8",
    "M8 7h8",
    "M12 13a5 5 0 1 0 0 10a5 5 0 1 0 0-10Z",
);
icon!(
    Megaphone,
    "m3 11 18-5v12L3 14v-3z",
    "M11.6 16.8a3 3 0 1 1-5.8-1.6",
);
icon!(
    Menu,
    "M4 6h16",
    "M4 12h16",
    "M4 18h16",
);
icon!(
    MessageCircle,
    "M7.9 20A9 9 0 1 0 4 16.1L2 22Z",
);
icon!(
    Moon,
    "M12 3a6 6 0 0 0 9 9 9 9 0 1 1-9-9Z",
);
icon!(
    MousePointerClick,
    "m9 9 5 12 1.8-5.2L21 14Z",
    "M7.2 2.2 8 5.1",
    "m5.1 8-2.9-.8",
    "M14 4.1 12 6",
    "m6 12-1.9 2",
);
icon!(
    Pencil,
    "M17 3a2.85 2.83 0 1 1 4 4L7.5 20.5 2 22l1.5-5.5Z",
    "m15 5 4 4",
);
icon!(
    Plus,
    "M5 12h14",
    "M12 5v14",
);
icon!(
    RefreshCw,
    "M3 12a9 9 0 0 1 9-9 9.75 9.75 0 0 1 6.74 2.74L21 8",
    "M21 3v5h-5",
    "M21 12a9 9 0 0 1-9 9 9.75 9.75 0 0 1-6.74-2.74L3 16",
    "M8 16H3v5",
);
icon!(
    Search,
    "M3 11a8 8 0 1 0 16 0a8 8 0 1 0-16 0",
    "m21 21-4.3-4.3",
);
icon!(
    Send,
    "m22 2-7 20-4-9-9-4Z",
    "M22 2 11 13",
);
icon!(
    ShieldCheck,
    "M20 13c0 5-3.5 7.5-7.66 8.95a1 1 0 0 1-.67-.01C7.5 20.5 4 18 4 13V6a1 1 0 0 1 1-1c2 0 4.5-1.2 6.24-2.72a1.17 1.17 0 0 1 1.52 0C14.51 3.81 17 5 19 5a1 1 0 0 1 1 1z",
    "m9 12 2 2 4-4",
);
icon!(
    Sun,
    "M8 12a4 4 0 1 0 8 0a4 4 0 1 0-8 0",
    "M12 2v2",
    "M12 20v2",
    "m4.93 4.93 1.41 1.41",
    "m17.66 17.66 1.41 1.41",
    "M2 12h2",
    "M20 12h2",
    "m6.34 17.66-1.41 1.41",
    "m19.07 4.93-1.41 1.41",
);
icon!(
    Trash2,
    "M3 6h18",
    "M19 6v14c0 1-1 2-2 2H7c-1 0-2-1-2-2V6",
    "M8 6V4c0-1 1-2 2-2h4c1 0 2 1 2 2v2",
    "M10 11v6",
    "M14 11v6",
);
icon!(
    Trophy,
    "M6 9H4.5a2.5 2.5 0 0 1 0-5H6",
    "M18 9h1.5a2.5 2.5 0 0 0 0-5H18",
    "M4 22h16",
    "M10 14.66V17c0 .55-.47.98-.97 1.21C7.85 18.75 7 20.24 7 22",
    "M14 14.66V17c0 .55.47.98.97 1.21C16.15 18.75 17 20.24 17 22",
    "M18 2H6v7a6 6 0 0 0 12 0V2Z",
);
icon!(
    UserIcon,
    "M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2",
    "M8 7a4 4 0 1 0 8 0a4 4 0 1 0-8 0",
);
icon!(
    UserPlus,
    "M16 21v-2a4 4 0 0 0-4-4H6a4 4 0 0 0-4 4v2",
    "M5 7a4 4 0 1 0 8 0a4 4 0 1 0-8 0",
    "M19 8v6",
    "M22 11h-6",
);
icon!(
    Users,
    "M16 21v-2a4 4 0 0 0-4-4H6a4 4 0 0 0-4 4v2",
    "M5 7a4 4 0 1 0 8 0a4 4 0 1 0-8 0",
    "M22 21v-2a4 4 0 0 0-3-3.87",
    "M16 3.13a4 4 0 0 1 0 7.75",
);
icon!(
    X,
    "M18 6 6 18",
    "m6 6 12 12",
);
