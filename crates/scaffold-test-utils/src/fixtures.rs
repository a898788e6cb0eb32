//! Project files as a generator first writes them.

/// Root router of the standard layout, before any router is added.
pub const ROOT_ROUTER: &str = r#"import { router } from "@/lib/server/trpc";

export const appRouter = router({});

export type AppRouter = typeof appRouter;
"#;

/// Root router of the t3 layout.
pub const T3_ROOT_ROUTER: &str = r#"import { createTRPCRouter } from "~/server/api/trpc";

/**
 * This is the primary router for your server.
 */
export const appRouter = createTRPCRouter({});

export type AppRouter = typeof appRouter;
"#;

pub const NAV: &str = r#"import { SidebarLink } from "@/components/SidebarItems";
import { Cog, Globe, HomeIcon } from "lucide-react";

export const defaultLinks: SidebarLink[] = [
  { href: "/dashboard", title: "Home", icon: HomeIcon },
  { href: "/settings", title: "Settings", icon: Cog },
];

export const additionalNavbarLinks: SidebarLink[] = [];
"#;

pub const ENV_SCHEMA: &str = r#"import { createEnv } from "@t3-oss/env-nextjs";
import { z } from "zod";

export const env = createEnv({
  server: {
    NODE_ENV: z
      .enum(["development", "test", "production"])
      .default("development"),
  },
  client: {
    // NEXT_PUBLIC_PUBLISHABLE_KEY: z.string().min(1),
  },
  // If you're using Next.js < 13.4.4, you'll need to specify the runtimeEnv manually
  // runtimeEnv: {
  //   DATABASE_URL: process.env.DATABASE_URL,
  // },
  experimental__runtimeEnv: {
    // NEXT_PUBLIC_PUBLISHABLE_KEY: process.env.NEXT_PUBLIC_PUBLISHABLE_KEY,
  },
});
"#;

pub const ROOT_LAYOUT: &str = r#"import "./globals.css";
import type { Metadata } from "next";
import { Inter } from "next/font/google";

const inter = Inter({ subsets: ["latin"] });

export const metadata: Metadata = {
  title: "Create Next App",
  description: "Generated by create next app",
};

export default function RootLayout({
  children,
}: {
  children: React.ReactNode;
}) {
  return (
    <html lang="en">
      <body className={inter.className}>{children}</body>
    </html>
  );
}
"#;

pub const DOTENV: &str = "NODE_ENV=development\n";
